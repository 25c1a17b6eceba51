//! Row selection, context menu and bulk actions
//!
//! Selection is tracked by row id and scoped to the page currently on screen.
//! The context menu can only be opened from a row that is itself selected, so
//! a bulk action never runs against a row the user did not pick.

use crate::types::{ContextMenuState, GridError, RowId};
use std::collections::HashSet;
use std::fmt;

/// Handler for a bulk action; receives the selected rows in page order
pub type BulkHandler<R> = Box<dyn FnMut(&[R]) -> Result<(), GridError>>;

/// Named action offered by the context menu
pub struct BulkAction<R> {
    pub id: String,
    pub label: String,
    handler: BulkHandler<R>,
}

impl<R> BulkAction<R> {
    pub fn new(
        id: &str,
        label: &str,
        handler: impl FnMut(&[R]) -> Result<(), GridError> + 'static,
    ) -> Self {
        BulkAction {
            id: id.to_string(),
            label: label.to_string(),
            handler: Box::new(handler),
        }
    }

    /// Run the handler. Failures are the handler's business; they are only
    /// logged here.
    pub(crate) fn invoke(&mut self, rows: &[R]) {
        if let Err(e) = (self.handler)(rows) {
            tracing::warn!("Bulk action '{}' reported a failure: {}", self.id, e);
        }
    }
}

impl<R> fmt::Debug for BulkAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Selected row ids plus the context menu anchored to one of them
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Row ids of the current page, in display order
    page: Vec<RowId>,
    selected: HashSet<RowId>,
    menu: Option<ContextMenuState>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current page, dropping selections for rows that left it
    ///
    /// # Returns
    ///
    /// `true` if the selection set shrank.
    pub fn set_page(&mut self, page: Vec<RowId>) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| page.contains(id));
        if let Some(menu) = &self.menu {
            if !self.selected.contains(&menu.target_row) {
                self.menu = None;
            }
        }
        self.page = page;
        before != self.selected.len()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Every row on the page is selected (and the page is not empty)
    pub fn all_selected(&self) -> bool {
        !self.page.is_empty() && self.page.iter().all(|id| self.selected.contains(id))
    }

    /// Some, but not all, rows on the page are selected
    pub fn partially_selected(&self) -> bool {
        !self.selected.is_empty() && !self.all_selected()
    }

    /// Selected ids in page order
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.page
            .iter()
            .filter(|id| self.selected.contains(*id))
            .cloned()
            .collect()
    }

    /// Flip one row; ids not on the current page are ignored
    pub fn toggle_row(&mut self, id: &str) -> bool {
        if !self.page.iter().any(|row| row == id) {
            return false;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        } else if self.menu.as_ref().is_some_and(|m| m.target_row == id) {
            self.menu = None;
        }
        true
    }

    /// Select or deselect every row on the page
    pub fn toggle_all_on_page(&mut self, select: bool) -> bool {
        if select {
            let before = self.selected.len();
            self.selected.extend(self.page.iter().cloned());
            before != self.selected.len()
        } else {
            self.clear()
        }
    }

    /// Clear the selection and close the menu
    pub fn clear(&mut self) -> bool {
        self.menu = None;
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    pub fn menu(&self) -> Option<&ContextMenuState> {
        self.menu.as_ref()
    }

    /// Open the context menu on a right-click over `row`
    ///
    /// Suppressed unless `row` itself is selected; a right-click on an
    /// unselected row never opens the menu for the other selected rows.
    pub fn open_menu(&mut self, row: &str, anchor_x: f64, anchor_y: f64) -> bool {
        if self.selected.is_empty() || !self.selected.contains(row) {
            return false;
        }
        self.menu = Some(ContextMenuState {
            anchor_x,
            anchor_y,
            target_row: row.to_string(),
        });
        true
    }

    pub fn close_menu(&mut self) -> bool {
        self.menu.take().is_some()
    }
}
