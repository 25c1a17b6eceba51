//! Manual pagination
//!
//! The engine never slices or counts rows. `page_count` is whatever the data
//! source last reported, and may lag behind a page-size change; an index past
//! the end is a tolerated intermediate state, not an error.

use crate::types::PaginationState;

#[derive(Debug, Clone)]
pub struct PaginationController {
    state: PaginationState,
    page_count: usize,
}

impl PaginationController {
    pub fn new(page_size: usize) -> Self {
        PaginationController {
            state: PaginationState::new(page_size),
            page_count: 0,
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Record the page count reported by the data source
    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
    }

    pub fn can_previous(&self) -> bool {
        self.state.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.state.page_index + 1 < self.page_count
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous() {
            return false;
        }
        self.state.page_index -= 1;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.state.page_index += 1;
        true
    }

    /// Jump to `index`; out-of-range targets are ignored
    pub fn goto_page(&mut self, index: usize) -> bool {
        if index >= self.page_count || index == self.state.page_index {
            return false;
        }
        self.state.page_index = index;
        true
    }

    /// Change the page size without re-clamping the index
    ///
    /// Zero is rejected.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 || page_size == self.state.page_size {
            return false;
        }
        self.state.page_size = page_size;
        true
    }
}
