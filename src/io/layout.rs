//! Column layout and row files
//!
//! Screens declare their columns in code; the CLI reads the same information
//! from a JSON layout file instead:
//!
//! ```json
//! [
//!   {"id": "select", "structural": true},
//!   {"id": "nome", "header": "Nome", "filterable": true},
//!   {"id": "liquido", "header": "Líquido", "path": "valores.liquido"}
//! ]
//! ```
//!
//! Row files are a JSON array of objects.

use crate::types::{ColumnDescriptor, GridError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One entry of a layout file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LayoutColumn {
    pub id: String,
    #[serde(default)]
    pub header: Option<String>,
    /// Field path; defaults to the id
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default = "default_true")]
    pub can_hide: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub structural: bool,
}

fn default_true() -> bool {
    true
}

impl LayoutColumn {
    pub fn into_descriptor(self) -> ColumnDescriptor<Value> {
        if self.structural {
            return ColumnDescriptor::structural(&self.id);
        }
        let header = self.header.unwrap_or_else(|| self.id.clone());
        let path = self.path.unwrap_or_else(|| self.id.clone());
        let mut column = ColumnDescriptor::new(&self.id, header).path(&path);
        column.filterable = self.filterable;
        column.can_hide = self.can_hide;
        column.visible = self.visible || !self.can_hide;
        column
    }
}

/// Parse a layout document into descriptors
///
/// # Errors
///
/// Returns `GridError::InvalidLayout` for malformed JSON, an empty layout,
/// blank ids or duplicate ids.
pub fn parse_layout(content: &str) -> Result<Vec<ColumnDescriptor<Value>>, GridError> {
    let columns: Vec<LayoutColumn> =
        serde_json::from_str(content).map_err(GridError::invalid_layout)?;
    if columns.is_empty() {
        return Err(GridError::invalid_layout("layout declares no columns"));
    }

    let mut seen = HashSet::new();
    for column in &columns {
        if column.id.trim().is_empty() {
            return Err(GridError::invalid_layout("column with blank id"));
        }
        if !seen.insert(column.id.as_str()) {
            return Err(GridError::invalid_layout(format!(
                "duplicate column id '{}'",
                column.id
            )));
        }
    }

    Ok(columns
        .into_iter()
        .map(LayoutColumn::into_descriptor)
        .collect())
}

pub fn read_layout(path: &Path) -> Result<Vec<ColumnDescriptor<Value>>, GridError> {
    parse_layout(&read_file(path)?)
}

/// Read a JSON array of row objects
///
/// # Errors
///
/// Returns `GridError::Io` if the file cannot be read and
/// `GridError::Serialization` if it is not an array of objects.
pub fn read_rows(path: &Path) -> Result<Vec<Value>, GridError> {
    let rows: Vec<Value> = serde_json::from_str(&read_file(path)?)?;
    if let Some(index) = rows.iter().position(|row| !row.is_object()) {
        return Err(GridError::Serialization {
            key: None,
            message: format!("row {} in {} is not an object", index, path.display()),
        });
    }
    Ok(rows)
}

fn read_file(path: &Path) -> Result<String, GridError> {
    fs::read_to_string(path).map_err(|e| GridError::Io {
        message: format!("{}: {}", path.display(), e),
    })
}
