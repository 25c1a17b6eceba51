//! Pending-delete overlay
//!
//! Purely visual: a marked row stays in the data and stays interactive until
//! the caller removes it. Marks are kept across page changes.

use crate::types::RowId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct PendingDeletes {
    marked: HashSet<RowId>,
}

impl PendingDeletes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the mark for `id`
    ///
    /// # Returns
    ///
    /// `true` if the row is now pending, `false` if the mark was removed.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.marked.remove(id) {
            false
        } else {
            self.marked.insert(id.to_string());
            true
        }
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.marked.contains(id)
    }

    /// Drop the mark once the caller has actually removed the row
    pub fn forget(&mut self, id: &str) -> bool {
        self.marked.remove(id)
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }
}
