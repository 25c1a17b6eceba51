//! Preference persistence adapter
//!
//! Maps (module, user) pairs onto two opaque keys in a [`PreferenceStore`]:
//! `columns_{module}_{user}` holds the column order, `visibility_{module}_{user}`
//! the visibility map. Both are JSON.
//!
//! Loading never fails: an unreadable or corrupt record is logged and treated
//! as absent so the grid still renders with its declared layout.

use crate::core::traits::PreferenceStore;
use crate::types::{GridError, PersistedColumn, PreferenceRecord, VisibilityMap};

/// Store key for the persisted column order
pub fn columns_key(module: &str, user: &str) -> String {
    format!("columns_{}_{}", module, user)
}

/// Store key for the persisted visibility map
pub fn visibility_key(module: &str, user: &str) -> String {
    format!("visibility_{}_{}", module, user)
}

/// Thin typed layer over a [`PreferenceStore`]
pub struct PreferenceAdapter {
    store: Box<dyn PreferenceStore>,
}

impl PreferenceAdapter {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        PreferenceAdapter { store }
    }

    /// Load the record for (module, user)
    ///
    /// # Returns
    ///
    /// `None` when neither key is present. When only one key is present the
    /// other half defaults to empty. Corrupt halves are logged and treated as
    /// missing.
    pub fn load(&self, module: &str, user: &str) -> Option<PreferenceRecord> {
        let columns: Option<Vec<PersistedColumn>> = self.load_json(&columns_key(module, user));
        let visibility: Option<VisibilityMap> = self.load_json(&visibility_key(module, user));

        if columns.is_none() && visibility.is_none() {
            return None;
        }

        Some(PreferenceRecord {
            columns: columns.unwrap_or_default(),
            visibility: visibility.unwrap_or_default(),
        })
    }

    /// Overwrite the record for (module, user)
    ///
    /// No merge with whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns the store's error if either write fails.
    pub fn save(
        &mut self,
        module: &str,
        user: &str,
        record: &PreferenceRecord,
    ) -> Result<(), GridError> {
        let key = columns_key(module, user);
        let columns =
            serde_json::to_string(&record.columns).map_err(|e| GridError::serialization(&key, e))?;
        self.store.save(&key, &columns)?;

        let key = visibility_key(module, user);
        let visibility = serde_json::to_string(&record.visibility)
            .map_err(|e| GridError::serialization(&key, e))?;
        self.store.save(&key, &visibility)?;

        tracing::debug!("Saved column preferences for {}/{}", module, user);
        Ok(())
    }

    fn load_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.load(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read preference '{}': {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring unreadable preference '{}': {}", key, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for PreferenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceAdapter").finish_non_exhaustive()
    }
}
