//! Render snapshot
//!
//! Everything the rendering layer needs to draw one frame, resolved into plain
//! values: visible columns with their filter state, the page's cells, footer
//! texts and pagination flags.

use crate::types::{ColumnId, ColumnKind, ContextMenuState, RowId};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub id: ColumnId,
    pub header: String,
    pub kind: ColumnKind,
    pub filterable: bool,
    /// Committed filter text, if any
    pub filter: Option<String>,
    pub filter_open: bool,
    /// Footer text; empty when no total is configured
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: RowId,
    /// One cell per visible column, in the same order as `GridView::columns`
    pub cells: Vec<Value>,
    pub selected: bool,
    /// Drawn de-emphasized, still fully interactive
    pub pending_delete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
    pub pagination: PaginationView,
    pub context_menu: Option<ContextMenuState>,
    pub all_selected: bool,
    pub partially_selected: bool,
}
