//! Reconciliation Grid Library
//! # Overview
//!
//! This library provides the state engine behind the data grids of a
//! payment-reconciliation back office: clients, batches and transfer
//! listings share one engine configured with different columns.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (columns, rows, persisted state, errors)
//! - [`config`] - Grid configuration and currency formatting
//! - [`cli`] - CLI arguments parsing and command execution
//! - [`core`] - Grid state components:
//!   - [`core::engine`] - Orchestration of all sub-states
//!   - [`core::column_model`] - Column order and visibility
//!   - [`core::preferences`] - Per-user, per-module persistence
//!   - [`core::selection`] - Selection, context menu and bulk actions
//! - [`io`] - Preference stores, layout files and CSV export
//!
//! # Data Flow
//!
//! The engine never fetches rows. It emits pagination and filter changes to a
//! [`core::GridListener`]; the caller fetches the page and hands it back with
//! [`GridEngine::set_data`]. Column order and visibility survive reloads
//! through a [`core::PreferenceStore`], keyed by module and user.
//!
//! # Grid State
//!
//! Each grid maintains:
//! - Column order and visibility, restored from preferences
//! - One text filter per filterable column, with at most one editor open
//! - Manual pagination (page index, page size, page count from the server)
//! - Selected rows on the current page, delivered to listeners on the next tick
//! - Rows optimistically marked for deletion
//! - Footer totals over the loaded page

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod types;

pub use config::{CurrencyFormat, GridConfig};
pub use core::{BulkAction, ExportColumn, FooterSum, GridEngine, GridListener, PreferenceStore};
pub use io::{write_export_csv, FilePreferenceStore, MemoryPreferenceStore};
pub use types::{ColumnDescriptor, ColumnId, GridError, GridRow, Header, RowId};
