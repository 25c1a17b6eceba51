//! Engine integration tests
//!
//! These tests drive a GridEngine through its public API the way a screen
//! would: mount, deliver pages, react to events, and reload preferences with
//! a fresh engine sharing the same store.

#[cfg(test)]
mod tests {
    use recon_grid::core::reorder;
    use recon_grid::types::PaginationState;
    use recon_grid::{
        BulkAction, ColumnDescriptor, ExportColumn, FooterSum, GridConfig, GridEngine,
        GridListener, MemoryPreferenceStore,
    };
    use rstest::rstest;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Pagination(usize, usize),
        Selection(Vec<Value>),
        Delete(Value, usize),
        Export(Vec<String>),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Event>>>);

    impl Recorder {
        fn drain(&self) -> Vec<Event> {
            self.0.borrow_mut().drain(..).collect()
        }
    }

    impl GridListener<Value> for Recorder {
        fn pagination_changed(&mut self, state: PaginationState) {
            self.0
                .borrow_mut()
                .push(Event::Pagination(state.page_index, state.page_size));
        }

        fn selection_changed(&mut self, rows: &[Value]) {
            self.0.borrow_mut().push(Event::Selection(rows.to_vec()));
        }

        fn delete_requested(&mut self, row: &Value, index: usize) {
            self.0.borrow_mut().push(Event::Delete(row.clone(), index));
        }

        fn export_columns_changed(&mut self, columns: &[ExportColumn]) {
            self.0
                .borrow_mut()
                .push(Event::Export(columns.iter().map(|c| c.id.clone()).collect()));
        }
    }

    fn layout(valor_header: &str) -> Vec<ColumnDescriptor<Value>> {
        vec![
            ColumnDescriptor::structural("select"),
            ColumnDescriptor::new("nome", "Nome").filterable(),
            ColumnDescriptor::new("valor", valor_header),
            ColumnDescriptor::structural("actions"),
        ]
    }

    fn grid(
        store: &MemoryPreferenceStore,
        valor_header: &str,
        recorder: &Recorder,
    ) -> GridEngine<Value> {
        let mut engine = GridEngine::new(
            GridConfig::new("batches", 2),
            layout(valor_header),
            Box::new(store.clone()),
        )
        .with_listener(recorder.clone());
        engine.mount("ana");
        engine
    }

    fn page() -> Vec<Value> {
        vec![
            json!({"id": 1, "nome": "Loja", "valor": 10}),
            json!({"id": 2, "nome": "Mercado", "valor": 20}),
        ]
    }

    fn export_ids(engine: &GridEngine<Value>) -> Vec<&str> {
        engine
            .export_columns()
            .iter()
            .map(|column| column.id.as_str())
            .collect()
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        let order: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        for from in &order {
            for to in &order {
                let mut result = reorder(&order, from, to);
                assert_eq!(result.len(), order.len());
                let position = result.iter().position(|id| id == from).unwrap();
                assert_eq!(position, order.iter().position(|id| id == to).unwrap());
                result.sort();
                assert_eq!(result, order);
            }
        }
    }

    #[test]
    fn test_mount_emits_export_projection() {
        let recorder = Recorder::default();
        let engine = grid(&MemoryPreferenceStore::new(), "Valor", &recorder);

        assert_eq!(export_ids(&engine), vec!["nome", "valor"]);
        assert_eq!(
            recorder.drain(),
            vec![Event::Export(vec!["nome".into(), "valor".into()])]
        );
    }

    #[test]
    fn test_hidden_column_survives_reload_and_rename() {
        let store = MemoryPreferenceStore::new();
        let recorder = Recorder::default();

        let mut first = grid(&store, "Valor", &recorder);
        assert!(first.set_column_visible("valor", false));
        first.save_preferences().unwrap();
        assert_eq!(first.take_notice().as_deref(), Some("Column preferences saved"));
        assert_eq!(first.take_notice(), None);

        let second = grid(&store, "Valor", &recorder);
        assert!(!second.columns().is_visible("valor"));
        assert_eq!(export_ids(&second), vec!["nome"]);

        // Header renamed in code: the persisted entry no longer resolves
        let renamed = grid(&store, "Valor líquido", &recorder);
        let stub = renamed.columns().column("valor~stale").unwrap();
        assert!(stub.is_stub());
        assert!(!renamed.columns().is_visible("valor"));
        assert_eq!(export_ids(&renamed), vec!["nome"]);
        assert_eq!(renamed.columns().columns().len(), 5);
    }

    #[test]
    fn test_filter_editor_is_exclusive() {
        let recorder = Recorder::default();
        let mut engine = GridEngine::new(
            GridConfig::default(),
            vec![
                ColumnDescriptor::new("nome", "Nome").filterable(),
                ColumnDescriptor::new("cidade", "Cidade").filterable(),
                ColumnDescriptor::new("valor", "Valor"),
            ],
            Box::new(MemoryPreferenceStore::new()),
        )
        .with_listener(recorder);

        assert!(engine.open_filter("nome"));
        engine.filter_input("lo");
        assert!(engine.open_filter("cidade"));
        assert_eq!(engine.open_filter_column(), Some("cidade"));
        assert!(!engine.open_filter("valor"));
        assert_eq!(engine.open_filter_column(), Some("cidade"));
        assert_eq!(engine.filters().get("nome").map(String::as_str), Some("lo"));

        engine.escape();
        assert_eq!(engine.open_filter_column(), None);
    }

    #[rstest]
    #[case::first_page(0, 3, false, true)]
    #[case::middle_page(1, 3, true, true)]
    #[case::last_page(2, 3, true, false)]
    #[case::single_page(0, 1, false, false)]
    #[case::no_pages(0, 0, false, false)]
    fn test_pagination_bounds(
        #[case] index: usize,
        #[case] page_count: usize,
        #[case] can_previous: bool,
        #[case] can_next: bool,
    ) {
        let recorder = Recorder::default();
        let mut engine = grid(&MemoryPreferenceStore::new(), "Valor", &recorder);
        engine.set_data(page(), page_count);
        engine.goto_page(index);

        assert_eq!(engine.pagination().page_index, index);
        assert_eq!(engine.can_previous_page(), can_previous);
        assert_eq!(engine.can_next_page(), can_next);
    }

    #[test]
    fn test_navigation_emits_only_on_change() {
        let recorder = Recorder::default();
        let mut engine = grid(&MemoryPreferenceStore::new(), "Valor", &recorder);
        engine.set_data(page(), 2);
        recorder.drain();

        engine.previous_page();
        engine.next_page();
        engine.next_page();
        engine.goto_page(7);
        engine.set_page_size(2);
        engine.set_page_size(20);

        assert_eq!(
            recorder.drain(),
            vec![Event::Pagination(1, 2), Event::Pagination(1, 20)]
        );
    }

    #[test]
    fn test_footer_totals_skip_non_numeric() {
        let recorder = Recorder::default();
        let mut engine = grid(&MemoryPreferenceStore::new(), "Valor", &recorder)
            .with_footer_sums(vec![FooterSum::new("valor", "a.b")]);

        engine.set_data(
            vec![
                json!({"id": 1, "a": {"b": 10}}),
                json!({"id": 2, "a": {"b": "x"}}),
                json!({"id": 3, "a": {}}),
            ],
            1,
        );

        assert_eq!(engine.aggregator().total("valor"), Some(Decimal::from(10)));
        assert_eq!(engine.footer("valor"), "R$ 10,00");
        assert_eq!(engine.footer("nome"), "");
    }

    #[test]
    fn test_selection_is_delivered_on_tick() {
        let recorder = Recorder::default();
        let mut engine = grid(&MemoryPreferenceStore::new(), "Valor", &recorder);
        engine.set_data(page(), 1);
        engine.tick();
        recorder.drain();

        engine.toggle_row("2");
        assert!(engine.is_selected("2"));
        assert!(engine.selected_rows().is_empty());
        assert!(recorder.drain().is_empty());
        assert!(!engine.is_settled());

        assert_eq!(engine.tick(), 1);
        assert!(engine.is_settled());
        assert_eq!(engine.selected_rows(), &page()[1..]);
        assert_eq!(recorder.drain(), vec![Event::Selection(page()[1..].to_vec())]);
    }

    #[test]
    fn test_bulk_action_clears_selection() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let recorder = Recorder::default();
        let mut engine = grid(&MemoryPreferenceStore::new(), "Valor", &recorder).with_bulk_action(
            BulkAction::new("approve", "Aprovar", move |rows: &[Value]| {
                sink.borrow_mut().extend(rows.iter().cloned());
                Ok(())
            }),
        );
        engine.set_data(page(), 1);
        engine.toggle_all_on_page(true);
        assert!(engine.open_context_menu("1", 12.0, 40.0));

        assert!(engine.invoke_bulk_action("approve"));
        assert_eq!(*seen.borrow(), page());
        assert!(engine.context_menu().is_none());
        assert!(!engine.is_selected("1"));
        assert!(!engine.invoke_bulk_action("approve"));
    }

    #[test]
    fn test_pending_delete_toggle_is_idempotent_in_pairs() {
        let recorder = Recorder::default();
        let mut engine = grid(&MemoryPreferenceStore::new(), "Valor", &recorder);
        engine.set_data(page(), 1);
        recorder.drain();

        assert!(engine.toggle_pending_delete("2"));
        assert!(!engine.toggle_pending_delete("2"));
        assert!(!engine.is_pending_delete("2"));
        assert!(engine.toggle_pending_delete("2"));

        assert_eq!(
            recorder.drain(),
            vec![
                Event::Delete(page()[1].clone(), 1),
                Event::Delete(page()[1].clone(), 1),
            ]
        );
    }

    #[test]
    fn test_reorder_updates_export_and_persists() {
        let store = MemoryPreferenceStore::new();
        let recorder = Recorder::default();
        let mut engine = grid(&store, "Valor", &recorder);
        recorder.drain();

        assert!(engine.reorder_columns("valor", "nome"));
        assert_eq!(
            recorder.drain(),
            vec![Event::Export(vec!["valor".into(), "nome".into()])]
        );
        engine.save_preferences().unwrap();

        let reloaded = grid(&store, "Valor", &recorder);
        assert_eq!(
            reloaded.columns().order(),
            vec!["select", "valor", "nome", "actions"]
        );
    }

    #[test]
    fn test_switching_user_loads_their_preferences() {
        let store = MemoryPreferenceStore::new();
        let recorder = Recorder::default();
        let mut engine = grid(&store, "Valor", &recorder);
        engine.set_column_visible("valor", false);
        engine.save_preferences().unwrap();

        assert!(engine.set_user("bruno"));
        assert!(!engine.set_user("bruno"));
        assert!(engine.columns().is_visible("valor"));

        assert!(engine.set_user("ana"));
        assert!(!engine.columns().is_visible("valor"));
        let picker: Vec<&str> = engine
            .hideable_columns()
            .into_iter()
            .map(|column| column.id.as_str())
            .collect();
        assert_eq!(picker, vec!["nome", "valor"]);
    }

    #[test]
    fn test_structural_columns_outside_denylist_are_not_exported() {
        let recorder = Recorder::default();
        let mut engine = GridEngine::new(
            GridConfig::default(),
            vec![
                ColumnDescriptor::structural("checkbox"),
                ColumnDescriptor::new("nome", "Nome"),
                ColumnDescriptor::structural("row_actions"),
            ],
            Box::new(MemoryPreferenceStore::new()),
        )
        .with_listener(recorder.clone());
        engine.mount("ana");

        assert_eq!(export_ids(&engine), vec!["nome"]);
        assert_eq!(recorder.drain(), vec![Event::Export(vec!["nome".into()])]);
    }
}
