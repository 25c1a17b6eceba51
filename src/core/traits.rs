//! Seams between the engine and its collaborators
//!
//! The engine delegates everything with side effects: persistence goes through
//! a [`PreferenceStore`], and every outbound event goes to a
//! [`GridListener`]. Both are plain traits so tests can substitute in-memory
//! fakes.

use crate::core::export::ExportColumn;
use crate::types::{FilterMap, GridError, PaginationState};

/// Key/value persistence for column preferences
///
/// Durability, multi-device sync and conflict handling are the store's
/// concern. The engine writes last-write-wins and never retries.
pub trait PreferenceStore {
    /// Read the raw value stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<String>, GridError>;

    /// Overwrite the value stored under `key`
    fn save(&mut self, key: &str, value: &str) -> Result<(), GridError>;
}

/// Receiver of every event the engine emits
///
/// All methods default to no-ops. Everything is delivered synchronously from
/// the mutating call, except `selection_changed`, which is only delivered
/// from [`GridEngine::tick`](crate::core::GridEngine::tick).
pub trait GridListener<R> {
    fn pagination_changed(&mut self, _state: PaginationState) {}

    /// Receives the whole filter map, not just the edited entry
    fn filters_changed(&mut self, _filters: &FilterMap) {}

    /// Selected original rows, in page order
    fn selection_changed(&mut self, _rows: &[R]) {}

    fn edit_requested(&mut self, _row: &R) {}

    fn view_requested(&mut self, _row: &R) {}

    /// Fired when a row enters the pending-delete overlay
    fn delete_requested(&mut self, _row: &R, _index: usize) {}

    fn export_columns_changed(&mut self, _columns: &[ExportColumn]) {}

    /// One-shot confirmation after preferences were written
    fn preferences_saved(&mut self, _module: &str, _user: &str) {}
}

/// Listener that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl<R> GridListener<R> for NoopListener {}
