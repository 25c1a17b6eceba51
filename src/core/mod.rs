//! Core grid engine module
//!
//! This module contains the grid state components:
//! - `traits` - Seams to the preference store and event listener
//! - `engine` - Orchestration of all sub-states
//! - `column_model` - Column order and visibility
//! - `preferences` - Per-user, per-module persistence of column state
//! - `filter` - Per-column text filters with a single open editor
//! - `pagination` - Manual pagination state
//! - `selection` - Row selection, context menu and bulk actions
//! - `pending_delete` - Optimistic "marked for deletion" overlay
//! - `aggregation` - Footer totals over the loaded page
//! - `export` - Export column projection
//! - `scheduler` - Work deferred to the next tick
//! - `view` - Render snapshot

pub mod aggregation;
pub mod column_model;
pub mod engine;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod pending_delete;
pub mod preferences;
pub mod scheduler;
pub mod selection;
pub mod traits;
pub mod view;

pub use aggregation::{Aggregator, FooterSum};
pub use column_model::{reorder, ColumnModel};
pub use engine::GridEngine;
pub use export::ExportColumn;
pub use preferences::PreferenceAdapter;
pub use selection::BulkAction;
pub use traits::{GridListener, NoopListener, PreferenceStore};
pub use view::GridView;
