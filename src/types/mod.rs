//! Types module
//!
//! Contains the data model shared by every engine component:
//! - `column`: column descriptors, headers and accessors
//! - `row`: row identity and field access
//! - `state`: order, visibility, filter, pagination and persisted shapes
//! - `error`: error type for the grid engine

pub mod column;
pub mod error;
pub mod row;
pub mod state;

pub use column::{Accessor, ColumnDescriptor, ColumnId, ColumnKind, Header};
pub use error::GridError;
pub use row::{GridRow, RowId};
pub use state::{
    ColumnOrder, ContextMenuState, FilterMap, PaginationState, PersistedColumn, PreferenceRecord,
    VisibilityMap,
};
