//! Row-related types
//!
//! Rows are opaque to the engine. It only needs a stable identity per row and
//! a way to read named fields, which is what [`GridRow`] provides.

use serde_json::Value;

/// Row identifier
///
/// Stable within one page of data; used by the selection set and the
/// pending-delete overlay.
pub type RowId = String;

/// Capabilities the engine needs from a row
pub trait GridRow {
    /// Identity of this row
    fn row_id(&self) -> RowId;

    /// Read a top-level field by name
    ///
    /// Returns `None` when the row has no such field.
    fn field(&self, name: &str) -> Option<Value>;

    /// Walk a dot-separated path, starting with a top-level field
    ///
    /// `"merchant.totals.gross"` reads the `merchant` field and then descends
    /// into nested objects. Numeric segments index into arrays.
    fn lookup(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.').filter(|segment| !segment.is_empty());
        let first = segments.next()?;
        let mut current = self.field(first)?;
        for segment in segments {
            current = descend(&current, segment)?;
        }
        Some(current)
    }
}

fn descend(value: &Value, segment: &str) -> Option<Value> {
    match value {
        Value::Object(map) => map.get(segment).cloned(),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index).cloned()),
        _ => None,
    }
}

/// JSON objects are rows out of the box; identity comes from the `id` field.
///
/// Numeric ids are rendered without quotes so `{"id": 7}` and `{"id": "7"}`
/// share the identity `"7"`. Rows without an id get an empty identity, so
/// several id-less rows on one page are selected and marked together;
/// [`GridEngine::set_data`](crate::core::GridEngine::set_data) logs a warning
/// when a page carries duplicate ids.
impl GridRow for Value {
    fn row_id(&self) -> RowId {
        match self.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}
