//! Column model
//!
//! Owns the ordered column descriptors and the visibility map. Reordering is
//! expressed as a pure function over ids so it can be tested without any
//! drag-and-drop machinery; the model applies the same move to its
//! descriptors.
//!
//! # Preference Resolution
//!
//! Persisted orders are matched back to live descriptors by header label.
//! Entries that no longer match degrade to header-only stub columns instead
//! of failing. A renamed header and a removed column look identical here, so
//! both become stubs.

use crate::types::{
    ColumnDescriptor, ColumnId, ColumnOrder, PersistedColumn, PreferenceRecord, VisibilityMap,
};
use std::collections::HashSet;

/// Suffix given to a stub whose persisted id is still used by a live column
const STALE_SUFFIX: &str = "~stale";

/// Move `from` to the position currently held by `to`
///
/// Returns a copy of `order` unchanged when either id is missing or both are
/// the same. The result is always a permutation of the input.
pub fn reorder(order: &[ColumnId], from: &str, to: &str) -> ColumnOrder {
    let mut next = order.to_vec();
    if from == to {
        return next;
    }
    let from_index = order.iter().position(|id| id == from);
    let to_index = order.iter().position(|id| id == to);
    if let (Some(from_index), Some(to_index)) = (from_index, to_index) {
        let moved = next.remove(from_index);
        next.insert(to_index, moved);
    }
    next
}

/// Ordered descriptors plus visibility
#[derive(Debug)]
pub struct ColumnModel<R> {
    /// Live descriptors in declaration order, used for resolution and reset
    declared: Vec<ColumnDescriptor<R>>,
    /// Current display order, possibly including stubs
    columns: Vec<ColumnDescriptor<R>>,
    visibility: VisibilityMap,
}

impl<R> ColumnModel<R> {
    /// Create a model from live descriptors
    ///
    /// Descriptors with a duplicate id are dropped (first one wins).
    pub fn new(descriptors: Vec<ColumnDescriptor<R>>) -> Self {
        let mut seen = HashSet::new();
        let declared: Vec<ColumnDescriptor<R>> = descriptors
            .into_iter()
            .filter(|column| {
                let fresh = seen.insert(column.id.clone());
                if !fresh {
                    tracing::warn!("Duplicate column id '{}' ignored", column.id);
                }
                fresh
            })
            .collect();

        let mut model = ColumnModel {
            columns: Vec::new(),
            visibility: VisibilityMap::new(),
            declared,
        };
        model.reset();
        model
    }

    /// Restore declaration order and declared visibility
    pub fn reset(&mut self) {
        self.columns = self.declared.clone();
        self.visibility = self
            .declared
            .iter()
            .map(|column| (column.id.clone(), column.visible || !column.can_hide))
            .collect();
    }

    pub fn columns(&self) -> &[ColumnDescriptor<R>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDescriptor<R>> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn order(&self) -> ColumnOrder {
        self.columns.iter().map(|column| column.id.clone()).collect()
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.get(id).copied().unwrap_or(true)
    }

    /// Columns currently shown, in display order
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDescriptor<R>> {
        self.columns
            .iter()
            .filter(move |column| self.is_visible(&column.id))
    }

    /// Columns the user may toggle; structural columns never appear here
    pub fn hideable_columns(&self) -> impl Iterator<Item = &ColumnDescriptor<R>> {
        self.columns.iter().filter(|column| column.can_hide)
    }

    /// Move `from` onto `to`'s position
    ///
    /// # Returns
    ///
    /// `true` if the order changed; missing ids and `from == to` are no-ops.
    pub fn reorder(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        let from_index = self.columns.iter().position(|column| column.id == from);
        let to_index = self.columns.iter().position(|column| column.id == to);
        match (from_index, to_index) {
            (Some(from_index), Some(to_index)) => {
                let moved = self.columns.remove(from_index);
                self.columns.insert(to_index, moved);
                tracing::debug!("Moved column '{}' to position {}", from, to_index);
                true
            }
            _ => false,
        }
    }

    /// Show or hide a single column
    ///
    /// # Returns
    ///
    /// `true` if visibility changed. Unknown ids, columns with
    /// `can_hide = false` and no-op toggles return `false`.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        let Some(column) = self.column(id) else {
            return false;
        };
        if !column.can_hide || self.is_visible(id) == visible {
            return false;
        }
        self.visibility.insert(id.to_string(), visible);
        tracing::debug!("Column '{}' visible={}", id, visible);
        true
    }

    /// Current state in persistable form
    pub fn to_preferences(&self) -> PreferenceRecord {
        PreferenceRecord {
            columns: self
                .columns
                .iter()
                .map(|column| PersistedColumn {
                    id: column.id.clone(),
                    header: column.header.label().unwrap_or_default().to_string(),
                })
                .collect(),
            visibility: self.visibility.clone(),
        }
    }

    /// Replace order and visibility with a persisted record
    ///
    /// Each persisted entry is matched to a live descriptor by header label;
    /// label-less entries (structural columns) match by id. Unmatched entries
    /// become stubs, duplicated entries are skipped, and live descriptors the
    /// record does not mention are appended in declaration order so the result
    /// stays a permutation of the live set plus stubs.
    ///
    /// # Returns
    ///
    /// The number of stub columns created.
    pub fn apply_preferences(&mut self, record: &PreferenceRecord) -> usize {
        let live_ids: HashSet<&str> = self.declared.iter().map(|c| c.id.as_str()).collect();
        let mut remaining: Vec<Option<&ColumnDescriptor<R>>> = self.declared.iter().map(Some).collect();
        let mut seen_persisted = HashSet::new();
        let mut used_ids: HashSet<String> = HashSet::new();
        let mut columns = Vec::with_capacity(self.declared.len());
        let mut visibility = VisibilityMap::new();
        let mut stubs = 0;

        for persisted in &record.columns {
            if !seen_persisted.insert(persisted.id.as_str()) {
                tracing::warn!("Persisted column '{}' listed twice, ignoring", persisted.id);
                continue;
            }
            let persisted_visible = record.visibility.get(&persisted.id).copied();

            let matched = remaining.iter_mut().find_map(|slot| {
                let column = (*slot)?;
                let hit = if persisted.header.is_empty() {
                    column.header.label().map_or(true, str::is_empty) && column.id == persisted.id
                } else {
                    column.header.label() == Some(persisted.header.as_str())
                };
                if hit {
                    slot.take()
                } else {
                    None
                }
            });

            match matched {
                Some(column) => {
                    let visible = !column.can_hide || persisted_visible.unwrap_or(column.visible);
                    visibility.insert(column.id.clone(), visible);
                    used_ids.insert(column.id.clone());
                    columns.push(column.clone());
                }
                None => {
                    tracing::warn!(
                        "Persisted column '{}' (header {:?}) no longer matches a live column, keeping a stub",
                        persisted.id,
                        persisted.header
                    );
                    let mut id = persisted.id.clone();
                    while live_ids.contains(id.as_str()) || used_ids.contains(&id) {
                        id.push_str(STALE_SUFFIX);
                    }
                    visibility.insert(id.clone(), persisted_visible.unwrap_or(true));
                    used_ids.insert(id.clone());
                    columns.push(ColumnDescriptor::stub(&id, &persisted.header));
                    stubs += 1;
                }
            }
        }

        for column in remaining.into_iter().flatten() {
            let visible = !column.can_hide
                || record
                    .visibility
                    .get(&column.id)
                    .copied()
                    .unwrap_or(column.visible);
            visibility.insert(column.id.clone(), visible);
            columns.push(column.clone());
        }

        self.columns = columns;
        self.visibility = visibility;
        stubs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    fn ids(values: &[&str]) -> ColumnOrder {
        values.iter().map(|id| id.to_string()).collect()
    }

    fn model() -> ColumnModel<Value> {
        ColumnModel::new(vec![
            ColumnDescriptor::structural("select"),
            ColumnDescriptor::new("nome", "Nome"),
            ColumnDescriptor::new("valor", "Valor"),
            ColumnDescriptor::new("status", "Status").hidden(),
            ColumnDescriptor::structural("actions"),
        ])
    }

    #[rstest]
    #[case::forward("a", "c", &["b", "c", "a", "d"])]
    #[case::backward("d", "b", &["a", "d", "b", "c"])]
    #[case::adjacent("b", "c", &["a", "c", "b", "d"])]
    #[case::same("b", "b", &["a", "b", "c", "d"])]
    #[case::missing_from("x", "b", &["a", "b", "c", "d"])]
    #[case::missing_to("a", "x", &["a", "b", "c", "d"])]
    fn test_reorder(#[case] from: &str, #[case] to: &str, #[case] expected: &[&str]) {
        let order = ids(&["a", "b", "c", "d"]);
        assert_eq!(reorder(&order, from, to), ids(expected));
    }

    #[test]
    fn test_reorder_is_permutation_for_all_pairs() {
        let order = ids(&["select", "nome", "valor", "status", "actions"]);
        for from in &order {
            for to in &order {
                let mut next = reorder(&order, from, to);
                assert_eq!(next.len(), order.len());
                next.sort();
                let mut sorted = order.clone();
                sorted.sort();
                assert_eq!(next, sorted, "reorder({}, {})", from, to);
            }
        }
    }

    #[test]
    fn test_model_reorder_matches_pure_function() {
        let mut model = model();
        let expected = reorder(&model.order(), "valor", "select");
        assert!(model.reorder("valor", "select"));
        assert_eq!(model.order(), expected);
        assert!(!model.reorder("valor", "valor"));
        assert!(!model.reorder("ghost", "nome"));
    }

    #[test]
    fn test_initial_visibility_follows_descriptors() {
        let model = model();
        assert!(model.is_visible("nome"));
        assert!(!model.is_visible("status"));
        let visible: Vec<_> = model.visible_columns().map(|c| c.id.as_str()).collect();
        assert_eq!(visible, vec!["select", "nome", "valor", "actions"]);
    }

    #[test]
    fn test_structural_columns_reject_hiding() {
        let mut model = model();
        assert!(!model.set_visible("select", false));
        assert!(model.is_visible("select"));
        let hideable: Vec<_> = model.hideable_columns().map(|c| c.id.as_str()).collect();
        assert_eq!(hideable, vec!["nome", "valor", "status"]);
    }

    #[test]
    fn test_set_visible_reports_changes() {
        let mut model = model();
        assert!(model.set_visible("valor", false));
        assert!(!model.set_visible("valor", false));
        assert!(!model.set_visible("ghost", false));
        assert!(model.set_visible("valor", true));
    }

    #[test]
    fn test_duplicate_descriptor_ids_are_dropped() {
        let model: ColumnModel<Value> = ColumnModel::new(vec![
            ColumnDescriptor::new("nome", "Nome"),
            ColumnDescriptor::new("nome", "Outro"),
        ]);
        assert_eq!(model.order(), ids(&["nome"]));
    }

    #[test]
    fn test_preferences_round_trip_through_model() {
        let mut original = model();
        original.reorder("valor", "nome");
        original.set_visible("nome", false);
        let record = original.to_preferences();

        let mut restored = model();
        assert_eq!(restored.apply_preferences(&record), 0);
        assert_eq!(restored.order(), original.order());
        assert_eq!(restored.visibility(), original.visibility());
    }

    #[test]
    fn test_renamed_header_degrades_to_stub() {
        let record = PreferenceRecord {
            columns: vec![
                PersistedColumn { id: "select".into(), header: String::new() },
                PersistedColumn { id: "valor".into(), header: "Valor Antigo".into() },
                PersistedColumn { id: "nome".into(), header: "Nome".into() },
            ],
            visibility: [("valor".to_string(), false)].into_iter().collect(),
        };
        let mut model = model();

        assert_eq!(model.apply_preferences(&record), 1);
        assert_eq!(
            model.order(),
            ids(&["select", "valor~stale", "nome", "valor", "status", "actions"])
        );
        let stub = model.column("valor~stale").unwrap();
        assert!(stub.is_stub());
        assert!(!model.is_visible("valor~stale"));
    }

    #[test]
    fn test_removed_column_keeps_persisted_id_for_stub() {
        let record = PreferenceRecord {
            columns: vec![PersistedColumn { id: "taxa".into(), header: "Taxa".into() }],
            visibility: VisibilityMap::new(),
        };
        let mut model = model();
        model.apply_preferences(&record);
        assert_eq!(model.order()[0], "taxa");
        assert!(model.column("taxa").unwrap().is_stub());
    }

    #[test]
    fn test_duplicate_persisted_entries_are_skipped() {
        let record = PreferenceRecord {
            columns: vec![
                PersistedColumn { id: "nome".into(), header: "Nome".into() },
                PersistedColumn { id: "nome".into(), header: "Nome".into() },
            ],
            visibility: VisibilityMap::new(),
        };
        let mut model = model();
        assert_eq!(model.apply_preferences(&record), 0);
        assert_eq!(model.order(), ids(&["nome", "select", "valor", "status", "actions"]));
    }

    #[test]
    fn test_persisted_visibility_cannot_hide_structural_columns() {
        let record = PreferenceRecord {
            columns: Vec::new(),
            visibility: [("actions".to_string(), false)].into_iter().collect(),
        };
        let mut model = model();
        model.apply_preferences(&record);
        assert!(model.is_visible("actions"));
    }

    #[test]
    fn test_reset_restores_declaration() {
        let mut model = model();
        model.reorder("actions", "select");
        model.set_visible("nome", false);
        model.reset();
        assert_eq!(model.order(), ids(&["select", "nome", "valor", "status", "actions"]));
        assert!(model.is_visible("nome"));
    }
}
