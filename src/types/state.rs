//! Plain state shapes shared by the engine components
//!
//! These are the values that cross the engine boundary: what gets persisted,
//! what listeners receive, and what the rendering layer reads.

use super::column::ColumnId;
use super::row::RowId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered column ids; always a permutation of the live descriptor set
pub type ColumnOrder = Vec<ColumnId>;

/// Column id -> visible. Absent ids are visible.
pub type VisibilityMap = BTreeMap<ColumnId, bool>;

/// Column id -> filter text. Absent ids are unfiltered.
pub type FilterMap = BTreeMap<ColumnId, String>;

/// One entry of a persisted column order
///
/// The header is stored next to the id because restoration matches on the
/// header label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedColumn {
    pub id: ColumnId,
    #[serde(default)]
    pub header: String,
}

/// Column preferences for one (module, user) pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub columns: Vec<PersistedColumn>,
    pub visibility: VisibilityMap,
}

/// Manual pagination state
///
/// The engine never knows the row total; `page_count` lives next to this
/// state and is supplied by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        PaginationState {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }
}

/// Open context menu, anchored where the user right-clicked
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuState {
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub target_row: RowId,
}
