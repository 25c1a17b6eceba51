//! Per-column text filters
//!
//! At most one filter editor is open at a time. Typing writes straight into the
//! filter map (no debouncing) and the caller forwards the whole map to the data
//! source after every change. Matching semantics belong to the data source;
//! values are kept as the exact text typed.

use crate::types::{ColumnId, FilterMap};

/// The editor currently open, with the text in its input box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEditor {
    pub column: ColumnId,
    pub draft: String,
}

/// Filter map plus the single open editor
#[derive(Debug, Clone, Default)]
pub struct FilterController {
    filters: FilterMap,
    editor: Option<FilterEditor>,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    pub fn editor(&self) -> Option<&FilterEditor> {
        self.editor.as_ref()
    }

    pub fn is_open(&self, column: &str) -> bool {
        self.editor
            .as_ref()
            .is_some_and(|editor| editor.column == column)
    }

    pub fn value(&self, column: &str) -> Option<&str> {
        self.filters.get(column).map(String::as_str)
    }

    /// Open the editor for `column`, closing any other one
    ///
    /// The closed editor's draft is discarded; committed map entries are left
    /// alone. The new editor starts from the column's committed value.
    pub fn open(&mut self, column: &str) {
        if self.is_open(column) {
            return;
        }
        self.editor = Some(FilterEditor {
            column: column.to_string(),
            draft: self.value(column).unwrap_or_default().to_string(),
        });
    }

    /// Apply a keystroke's worth of text to the open editor
    ///
    /// # Returns
    ///
    /// `true` if the filter map changed and must be emitted. Returns `false`
    /// when no editor is open.
    pub fn input(&mut self, text: &str) -> bool {
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        editor.draft = text.to_string();
        let column = editor.column.clone();
        self.commit(&column, text)
    }

    /// Close the open editor (Escape, outside click), keeping its value
    pub fn close(&mut self) -> bool {
        self.editor.take().is_some()
    }

    /// Remove one committed filter
    pub fn clear(&mut self, column: &str) -> bool {
        if let Some(editor) = self.editor.as_mut().filter(|e| e.column == column) {
            editor.draft.clear();
        }
        self.filters.remove(column).is_some()
    }

    /// Remove every committed filter and close the editor
    pub fn clear_all(&mut self) -> bool {
        self.editor = None;
        let changed = !self.filters.is_empty();
        self.filters.clear();
        changed
    }

    /// Drop filters for columns that no longer exist
    pub fn retain_columns(&mut self, mut exists: impl FnMut(&str) -> bool) -> bool {
        let before = self.filters.len();
        self.filters.retain(|column, _| exists(column));
        if self.editor.as_ref().is_some_and(|e| !exists(&e.column)) {
            self.editor = None;
        }
        before != self.filters.len()
    }

    fn commit(&mut self, column: &str, text: &str) -> bool {
        if text.is_empty() {
            return self.filters.remove(column).is_some();
        }
        match self.filters.get(column) {
            Some(current) if current == text => false,
            _ => {
                self.filters.insert(column.to_string(), text.to_string());
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_without_editor_is_ignored() {
        let mut controller = FilterController::new();
        assert!(!controller.input("abc"));
        assert!(controller.filters().is_empty());
    }

    #[test]
    fn test_every_keystroke_commits() {
        let mut controller = FilterController::new();
        controller.open("nome");
        assert!(controller.input("l"));
        assert!(controller.input("lo"));
        assert_eq!(controller.value("nome"), Some("lo"));
        assert!(!controller.input("lo"));
    }

    #[test]
    fn test_opening_another_editor_keeps_committed_values() {
        let mut controller = FilterController::new();
        controller.open("nome");
        controller.input("loja");
        controller.open("valor");

        assert!(controller.is_open("valor"));
        assert!(!controller.is_open("nome"));
        assert_eq!(controller.value("nome"), Some("loja"));
        assert_eq!(controller.editor().unwrap().draft, "");
    }

    #[test]
    fn test_reopening_starts_from_committed_value() {
        let mut controller = FilterController::new();
        controller.open("nome");
        controller.input("loja");
        controller.close();
        controller.open("nome");
        assert_eq!(controller.editor().unwrap().draft, "loja");
    }

    #[test]
    fn test_close_keeps_value() {
        let mut controller = FilterController::new();
        controller.open("valor");
        controller.input("10");
        assert!(controller.close());
        assert!(!controller.close());
        assert_eq!(controller.value("valor"), Some("10"));
    }

    #[test]
    fn test_values_are_not_coerced() {
        let mut controller = FilterController::new();
        controller.open("valor");
        controller.input(" 010,50 ");
        assert_eq!(controller.value("valor"), Some(" 010,50 "));
    }

    #[test]
    fn test_emptying_input_removes_entry() {
        let mut controller = FilterController::new();
        controller.open("nome");
        controller.input("x");
        assert!(controller.input(""));
        assert!(!controller.filters().contains_key("nome"));
    }

    #[test]
    fn test_clear_and_clear_all() {
        let mut controller = FilterController::new();
        controller.open("nome");
        controller.input("a");
        controller.open("valor");
        controller.input("1");

        assert!(controller.clear("valor"));
        assert_eq!(controller.editor().unwrap().draft, "");
        assert!(!controller.clear("valor"));
        assert!(controller.clear_all());
        assert!(controller.editor().is_none());
        assert!(!controller.clear_all());
    }

    #[test]
    fn test_retain_columns_drops_unknown_filters() {
        let mut controller = FilterController::new();
        controller.open("taxa");
        controller.input("2");
        assert!(controller.retain_columns(|column| column != "taxa"));
        assert!(controller.editor().is_none());
    }
}
