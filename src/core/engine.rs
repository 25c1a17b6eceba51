//! Grid engine
//!
//! This module provides the GridEngine that orchestrates one data grid by
//! coordinating the column model, filter, pagination and selection
//! controllers, the pending-delete overlay, footer aggregation and the export
//! projection.
//!
//! The engine owns state, never data: rows arrive from the caller with
//! [`GridEngine::set_data`], and fetching, persistence durability and action
//! execution go back out through the [`GridListener`], the
//! [`PreferenceStore`] and registered [`BulkAction`]s.
//!
//! # Invariants
//!
//! - Column order is always a permutation of the live columns (plus stubs)
//! - At most one filter editor is open
//! - Selection only holds ids of rows on the current page
//! - The export projection is recomputed exactly when order or visibility
//!   change
//! - `selection_changed` is only ever delivered from [`GridEngine::tick`]

use crate::config::GridConfig;
use crate::core::aggregation::{Aggregator, FooterSum};
use crate::core::column_model::ColumnModel;
use crate::core::export::{self, ExportColumn};
use crate::core::filter::FilterController;
use crate::core::pagination::PaginationController;
use crate::core::pending_delete::PendingDeletes;
use crate::core::preferences::PreferenceAdapter;
use crate::core::scheduler::{Deferred, Scheduler};
use crate::core::selection::{BulkAction, Selection};
use crate::core::traits::{GridListener, NoopListener, PreferenceStore};
use crate::core::view::{ColumnView, GridView, PaginationView, RowView};
use crate::types::{
    ColumnDescriptor, ContextMenuState, FilterMap, GridError, GridRow, PaginationState, RowId,
};
use std::collections::HashSet;

/// User identity used until [`GridEngine::mount`] is called
pub const ANONYMOUS_USER: &str = "anonymous";

/// Confirmation shown once after a successful preference save
pub const PREFERENCES_SAVED_NOTICE: &str = "Column preferences saved";

/// Data grid state engine
///
/// Generic over the row type; rows only need an identity and field access
/// (see [`GridRow`]).
pub struct GridEngine<R> {
    config: GridConfig,
    user: String,
    columns: ColumnModel<R>,
    preferences: PreferenceAdapter,
    filters: FilterController,
    pagination: PaginationController,
    selection: Selection,
    pending: PendingDeletes,
    aggregator: Aggregator,
    export_columns: Vec<ExportColumn>,
    scheduler: Scheduler,
    rows: Vec<R>,
    /// Selected rows as of the last tick
    selected_rows: Vec<R>,
    bulk_actions: Vec<BulkAction<R>>,
    listener: Box<dyn GridListener<R>>,
    notice: Option<String>,
}

impl<R: GridRow + Clone> GridEngine<R> {
    /// Create a new GridEngine
    ///
    /// The engine starts with the declared column layout, no rows and no
    /// listener. Call [`mount`](Self::mount) to load the user's preferences.
    ///
    /// # Arguments
    ///
    /// * `config` - Module key, page size, structural ids, currency format
    /// * `columns` - Live column descriptors in declaration order
    /// * `store` - Preference store for column order and visibility
    pub fn new(
        config: GridConfig,
        columns: Vec<ColumnDescriptor<R>>,
        store: Box<dyn PreferenceStore>,
    ) -> Self {
        let columns = ColumnModel::new(columns);
        let export_columns = export::project(&columns, &config);
        GridEngine {
            pagination: PaginationController::new(config.page_size),
            aggregator: Aggregator::new(Vec::new(), config.currency.clone()),
            user: ANONYMOUS_USER.to_string(),
            preferences: PreferenceAdapter::new(store),
            filters: FilterController::new(),
            selection: Selection::new(),
            pending: PendingDeletes::new(),
            scheduler: Scheduler::new(),
            rows: Vec::new(),
            selected_rows: Vec::new(),
            bulk_actions: Vec::new(),
            listener: Box::new(NoopListener),
            notice: None,
            export_columns,
            columns,
            config,
        }
    }

    /// Receive the engine's events
    pub fn with_listener(mut self, listener: impl GridListener<R> + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }

    /// Configure footer totals
    pub fn with_footer_sums(mut self, sums: Vec<FooterSum>) -> Self {
        self.aggregator = Aggregator::new(sums, self.config.currency.clone());
        self.aggregator.recompute(&self.rows);
        self
    }

    /// Register an action offered in the context menu
    pub fn with_bulk_action(mut self, action: BulkAction<R>) -> Self {
        self.bulk_actions.push(action);
        self
    }

    /// Bind the grid to a user and load their column preferences
    ///
    /// Always loads and always emits the export projection, so the export
    /// sink has a list from the first frame on.
    pub fn mount(&mut self, user: &str) {
        self.user = user.to_string();
        self.load_preferences();
    }

    /// Switch user; reloads preferences only if the identity changed
    pub fn set_user(&mut self, user: &str) -> bool {
        if self.user == user {
            return false;
        }
        self.mount(user);
        true
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Load (module, user) preferences, or fall back to the declared layout
    ///
    /// Persisted columns that no longer resolve become stub columns and are
    /// logged; nothing here fails.
    pub fn load_preferences(&mut self) {
        match self.preferences.load(&self.config.module, &self.user) {
            Some(record) => {
                let stubs = self.columns.apply_preferences(&record);
                if stubs > 0 {
                    tracing::warn!(
                        "{} persisted column(s) for {}/{} could not be resolved",
                        stubs,
                        self.config.module,
                        self.user
                    );
                }
            }
            None => self.columns.reset(),
        }

        let columns = &self.columns;
        if self
            .filters
            .retain_columns(|id| columns.column(id).is_some_and(|c| c.filterable))
        {
            self.listener.filters_changed(self.filters.filters());
        }
        self.refresh_export();
    }

    /// Persist the current order and visibility for (module, user)
    ///
    /// Last write wins. On success a one-shot notice is queued (see
    /// [`take_notice`](Self::take_notice)) and the listener is told.
    ///
    /// # Errors
    ///
    /// Returns the preference store's error; the notice is not raised then.
    pub fn save_preferences(&mut self) -> Result<(), GridError> {
        let record = self.columns.to_preferences();
        self.preferences
            .save(&self.config.module, &self.user, &record)?;
        self.notice = Some(PREFERENCES_SAVED_NOTICE.to_string());
        self.listener
            .preferences_saved(&self.config.module, &self.user);
        Ok(())
    }

    /// Take the pending confirmation notice, if any
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn columns(&self) -> &ColumnModel<R> {
        &self.columns
    }

    /// Columns offered by the column picker
    pub fn hideable_columns(&self) -> Vec<&ColumnDescriptor<R>> {
        self.columns.hideable_columns().collect()
    }

    /// Drag `from` onto `to`
    pub fn reorder_columns(&mut self, from: &str, to: &str) -> bool {
        let changed = self.columns.reorder(from, to);
        if changed {
            self.refresh_export();
        }
        changed
    }

    pub fn set_column_visible(&mut self, id: &str, visible: bool) -> bool {
        let changed = self.columns.set_visible(id, visible);
        if changed {
            self.refresh_export();
        }
        changed
    }

    /// Back to declaration order with declared visibility
    pub fn reset_columns(&mut self) {
        self.columns.reset();
        self.refresh_export();
    }

    pub fn export_columns(&self) -> &[ExportColumn] {
        &self.export_columns
    }

    fn refresh_export(&mut self) {
        self.export_columns = export::project(&self.columns, &self.config);
        self.listener.export_columns_changed(&self.export_columns);
    }

    pub fn filters(&self) -> &FilterMap {
        self.filters.filters()
    }

    pub fn open_filter_column(&self) -> Option<&str> {
        self.filters.editor().map(|editor| editor.column.as_str())
    }

    /// Open the filter editor of a filterable column
    pub fn open_filter(&mut self, column: &str) -> bool {
        if !self.columns.column(column).is_some_and(|c| c.filterable) {
            return false;
        }
        self.filters.open(column);
        true
    }

    /// Text typed into the open editor; the whole map is emitted on change
    pub fn filter_input(&mut self, text: &str) {
        if self.filters.input(text) {
            self.listener.filters_changed(self.filters.filters());
        }
    }

    pub fn clear_filter(&mut self, column: &str) {
        if self.filters.clear(column) {
            self.listener.filters_changed(self.filters.filters());
        }
    }

    pub fn clear_filters(&mut self) {
        if self.filters.clear_all() {
            self.listener.filters_changed(self.filters.filters());
        }
    }

    /// Escape: closes the filter editor (keeping its value), else the menu
    pub fn escape(&mut self) {
        if !self.filters.close() {
            self.selection.close_menu();
        }
    }

    /// Click outside any open editor or menu
    pub fn click_outside(&mut self) {
        self.filters.close();
        self.selection.close_menu();
    }

    /// Replace the current page with what the data source delivered
    ///
    /// Selection is pruned to the new page; pending-delete marks are kept.
    pub fn set_data(&mut self, rows: Vec<R>, page_count: usize) {
        let ids: Vec<RowId> = rows.iter().map(GridRow::row_id).collect();
        let duplicates = duplicate_ids(&ids);
        if !duplicates.is_empty() {
            tracing::warn!(
                "Page has rows sharing an id ({:?}); selection and pending-delete treat them as one row",
                duplicates
            );
        }
        self.rows = rows;
        self.pagination.set_page_count(page_count);
        self.aggregator.recompute(&self.rows);
        self.selection.set_page(ids);
        // Rows behind selected ids may have changed even if the ids did not
        self.scheduler.schedule(Deferred::DeriveSelection);
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination.state()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.can_previous()
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.can_next()
    }

    pub fn previous_page(&mut self) {
        if self.pagination.previous_page() {
            self.emit_pagination();
        }
    }

    pub fn next_page(&mut self) {
        if self.pagination.next_page() {
            self.emit_pagination();
        }
    }

    pub fn goto_page(&mut self, index: usize) {
        if self.pagination.goto_page(index) {
            self.emit_pagination();
        }
    }

    /// Change page size; the index is not clamped until the data source
    /// reports the new page count
    pub fn set_page_size(&mut self, page_size: usize) {
        if self.pagination.set_page_size(page_size) {
            self.emit_pagination();
        }
    }

    fn emit_pagination(&mut self) {
        let state = self.pagination.state();
        tracing::debug!(
            "Pagination changed: page {} size {}",
            state.page_index,
            state.page_size
        );
        self.listener.pagination_changed(state);
    }

    pub fn toggle_row(&mut self, id: &str) {
        if self.selection.toggle_row(id) {
            self.scheduler.schedule(Deferred::DeriveSelection);
        }
    }

    pub fn toggle_all_on_page(&mut self, select: bool) {
        if self.selection.toggle_all_on_page(select) {
            self.scheduler.schedule(Deferred::DeriveSelection);
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Selected rows as of the last [`tick`](Self::tick)
    pub fn selected_rows(&self) -> &[R] {
        &self.selected_rows
    }

    /// Right-click on `row`; see [`Selection::open_menu`] for when this is
    /// suppressed
    pub fn open_context_menu(&mut self, row: &str, anchor_x: f64, anchor_y: f64) -> bool {
        self.selection.open_menu(row, anchor_x, anchor_y)
    }

    pub fn context_menu(&self) -> Option<&ContextMenuState> {
        self.selection.menu()
    }

    pub fn bulk_actions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bulk_actions
            .iter()
            .map(|action| (action.id.as_str(), action.label.as_str()))
    }

    /// Run a bulk action over the selected rows
    ///
    /// Afterwards the selection is cleared and the menu closed whatever the
    /// action reported.
    ///
    /// # Returns
    ///
    /// `false` if the action is unknown or nothing is selected.
    pub fn invoke_bulk_action(&mut self, action_id: &str) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let Some(action) = self.bulk_actions.iter_mut().find(|a| a.id == action_id) else {
            tracing::warn!("Unknown bulk action '{}'", action_id);
            return false;
        };

        let rows = materialize(&self.rows, &self.selection);
        tracing::debug!("Invoking bulk action '{}' on {} row(s)", action_id, rows.len());
        action.invoke(&rows);

        self.selection.clear();
        self.scheduler.schedule(Deferred::DeriveSelection);
        true
    }

    /// Run deferred work scheduled by earlier calls
    ///
    /// # Returns
    ///
    /// The number of deferred tasks that ran.
    pub fn tick(&mut self) -> usize {
        let tasks = self.scheduler.drain();
        for task in &tasks {
            match task {
                Deferred::DeriveSelection => {
                    self.selected_rows = materialize(&self.rows, &self.selection);
                    self.listener.selection_changed(&self.selected_rows);
                }
            }
        }
        tasks.len()
    }

    /// Nothing is waiting for a tick
    pub fn is_settled(&self) -> bool {
        self.scheduler.is_idle()
    }

    pub fn request_edit(&mut self, id: &str) -> bool {
        match find_row(&self.rows, id) {
            Some((_, row)) => {
                self.listener.edit_requested(row);
                true
            }
            None => false,
        }
    }

    pub fn request_view(&mut self, id: &str) -> bool {
        match find_row(&self.rows, id) {
            Some((_, row)) => {
                self.listener.view_requested(row);
                true
            }
            None => false,
        }
    }

    /// Toggle the pending-delete mark for a row
    ///
    /// Entering the pending state fires `delete_requested` with the row and
    /// its index on the page (when the row is on the page); leaving it fires
    /// nothing.
    ///
    /// # Returns
    ///
    /// `true` if the row is now pending.
    pub fn toggle_pending_delete(&mut self, id: &str) -> bool {
        let pending = self.pending.toggle(id);
        if pending {
            if let Some((index, row)) = find_row(&self.rows, id) {
                self.listener.delete_requested(row, index);
            }
        }
        pending
    }

    pub fn is_pending_delete(&self, id: &str) -> bool {
        self.pending.is_pending(id)
    }

    /// Drop a pending mark after the caller removed the row for good
    pub fn forget_pending_delete(&mut self, id: &str) -> bool {
        self.pending.forget(id)
    }

    /// Footer text for a column; empty when no total is configured
    pub fn footer(&self, column: &str) -> String {
        self.aggregator.footer(column)
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Snapshot of everything the rendering layer draws
    pub fn view(&self) -> GridView {
        let visible: Vec<&ColumnDescriptor<R>> = self.columns.visible_columns().collect();

        let columns = visible
            .iter()
            .map(|column| ColumnView {
                id: column.id.clone(),
                header: column.header.display(),
                kind: column.kind,
                filterable: column.filterable,
                filter: self.filters.value(&column.id).map(str::to_string),
                filter_open: self.filters.is_open(&column.id),
                footer: self.aggregator.footer(&column.id),
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let id = row.row_id();
                RowView {
                    cells: visible.iter().map(|column| column.cell(row)).collect(),
                    selected: self.selection.is_selected(&id),
                    pending_delete: self.pending.is_pending(&id),
                    id,
                }
            })
            .collect();

        let state = self.pagination.state();
        GridView {
            columns,
            rows,
            pagination: PaginationView {
                page_index: state.page_index,
                page_size: state.page_size,
                page_count: self.pagination.page_count(),
                can_previous: self.pagination.can_previous(),
                can_next: self.pagination.can_next(),
                page_size_options: self.config.page_size_options.clone(),
            },
            context_menu: self.selection.menu().cloned(),
            all_selected: self.selection.all_selected(),
            partially_selected: self.selection.partially_selected(),
        }
    }
}

/// Ids that occur more than once, in first-seen order
fn duplicate_ids(ids: &[RowId]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for id in ids {
        if !seen.insert(id.as_str()) && !duplicates.contains(&id.as_str()) {
            duplicates.push(id.as_str());
        }
    }
    duplicates
}

fn find_row<'a, R: GridRow>(rows: &'a [R], id: &str) -> Option<(usize, &'a R)> {
    rows.iter().enumerate().find(|(_, row)| row.row_id() == id)
}

/// Selected rows in page order
fn materialize<R: GridRow + Clone>(rows: &[R], selection: &Selection) -> Vec<R> {
    rows.iter()
        .filter(|row| selection.is_selected(&row.row_id()))
        .cloned()
        .collect()
}

impl<R> std::fmt::Debug for GridEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridEngine")
            .field("module", &self.config.module)
            .field("user", &self.user)
            .field("rows", &self.rows.len())
            .field("pagination", &self.pagination.state())
            .finish_non_exhaustive()
    }
}
