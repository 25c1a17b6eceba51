//! Error types for the reconciliation grid engine
//!
//! The engine itself never fails on degenerate input: invalid reorder targets,
//! unresolvable preference entries and non-numeric totals all resolve to an
//! inert state. The variants below cover the surfaces that genuinely touch the
//! outside world.
//!
//! # Error Categories
//!
//! - **Persistence Errors**: preference store I/O and (de)serialization
//! - **Layout Errors**: malformed column layout files fed to the CLI
//! - **Action Errors**: failures reported by bulk action handlers
//! - **Export Errors**: CSV writing failures

use thiserror::Error;

/// Main error type for the grid engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// I/O error while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// A value could not be serialized or deserialized
    #[error("Serialization error{}: {message}", key.as_ref().map(|k| format!(" for '{}'", k)).unwrap_or_default())]
    Serialization {
        /// Preference key involved (if known)
        key: Option<String>,
        /// Description of the failure
        message: String,
    },

    /// The preference store refused a load or save
    #[error("Preference store error for '{key}': {message}")]
    PreferenceStore {
        /// Key that was being read or written
        key: String,
        /// Description of the failure
        message: String,
    },

    /// A column layout definition is unusable
    #[error("Invalid column layout: {message}")]
    InvalidLayout {
        /// Description of the problem
        message: String,
    },

    /// A column id does not exist in the grid
    #[error("Unknown column '{id}'")]
    UnknownColumn {
        /// The id that was looked up
        id: String,
    },

    /// A bulk action handler reported a failure
    ///
    /// The engine only logs this; selection is cleared regardless.
    #[error("Bulk action '{action}' failed: {message}")]
    ActionFailed {
        /// Id of the bulk action
        action: String,
        /// Failure reported by the handler
        message: String,
    },

    /// CSV output could not be produced
    #[error("CSV export error: {message}")]
    Export {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for GridError {
    fn from(error: std::io::Error) -> Self {
        GridError::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(error: serde_json::Error) -> Self {
        GridError::Serialization {
            key: None,
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for GridError {
    fn from(error: csv::Error) -> Self {
        GridError::Export {
            message: error.to_string(),
        }
    }
}

impl GridError {
    /// Create a Serialization error bound to a preference key
    pub fn serialization(key: &str, message: impl ToString) -> Self {
        GridError::Serialization {
            key: Some(key.to_string()),
            message: message.to_string(),
        }
    }

    /// Create a PreferenceStore error
    pub fn preference_store(key: &str, message: impl ToString) -> Self {
        GridError::PreferenceStore {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an InvalidLayout error
    pub fn invalid_layout(message: impl ToString) -> Self {
        GridError::InvalidLayout {
            message: message.to_string(),
        }
    }

    /// Create an UnknownColumn error
    pub fn unknown_column(id: &str) -> Self {
        GridError::UnknownColumn { id: id.to_string() }
    }

    /// Create an ActionFailed error
    pub fn action_failed(action: &str, message: impl ToString) -> Self {
        GridError::ActionFailed {
            action: action.to_string(),
            message: message.to_string(),
        }
    }
}
