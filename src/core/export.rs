//! Export projection
//!
//! Derives the `(id, header, accessor)` list an external exporter applies to
//! rows it fetched itself. Only data columns are exported: structural columns
//! are excluded by kind and by the configured id denylist, stubs because they
//! have nothing to read.
//!
//! Only literal headers carry over. A render-function header cannot be turned
//! into text outside the rendering layer, so the projection falls back to the
//! column id for it.

use crate::config::GridConfig;
use crate::core::column_model::ColumnModel;
use crate::types::{ColumnId, ColumnKind, GridRow};
use serde_json::Value;

/// One exported column; its accessor reads `row[id]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportColumn {
    pub id: ColumnId,
    pub header: String,
}

impl ExportColumn {
    /// Value of this column in `row`, `Null` when absent
    pub fn value<R: GridRow>(&self, row: &R) -> Value {
        row.field(&self.id).unwrap_or(Value::Null)
    }
}

/// Project the visible, exportable columns in display order
pub fn project<R>(model: &ColumnModel<R>, config: &GridConfig) -> Vec<ExportColumn> {
    model
        .visible_columns()
        .filter(|column| {
            column.kind == ColumnKind::Data && !config.is_structural(&column.id)
        })
        .map(|column| ExportColumn {
            id: column.id.clone(),
            header: match column.header.label() {
                Some(label) => label.to_string(),
                None => {
                    tracing::debug!(
                        "Column '{}' has a render-function header, exporting its id instead",
                        column.id
                    );
                    column.id.clone()
                }
            },
        })
        .collect()
}
