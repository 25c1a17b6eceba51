//! CSV export of projected columns
//!
//! Applies an export projection to rows the caller already holds. Paging is
//! the caller's concern: to export everything, fetch every page and pass the
//! rows through here.

use crate::core::export::ExportColumn;
use crate::types::{GridError, GridRow};
use serde_json::Value;
use std::io::Write;

/// Text written for one cell
///
/// Null is empty, strings are written raw, anything else as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Write `rows` as CSV using the export projection
///
/// # Arguments
///
/// * `rows` - Rows to export, written in the given order
/// * `columns` - Export projection; its headers form the header record
/// * `output` - Destination writer
///
/// # Errors
///
/// Returns `GridError::Export` if a record cannot be written or flushed.
pub fn write_export_csv<R: GridRow>(
    rows: &[R],
    columns: &[ExportColumn],
    output: &mut dyn Write,
) -> Result<(), GridError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(columns.iter().map(|column| column.header.as_str()))?;

    for row in rows {
        writer.write_record(columns.iter().map(|column| cell_text(&column.value(row))))?;
    }

    writer.flush()?;

    Ok(())
}
