//! Deferred effects
//!
//! Selected-row derivation settles one scheduler tick after the mutation that
//! caused it, so the row model can finish updating before listeners read it.
//! The owner of the engine drives ticks by calling
//! [`GridEngine::tick`](crate::core::GridEngine::tick) from its event loop.

use std::collections::VecDeque;

/// Work that runs on the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Re-derive selected original rows and notify the listener
    DeriveSelection,
}

/// FIFO of deferred work; scheduling the same task twice before a tick
/// runs it once
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: VecDeque<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: Deferred) {
        if !self.queue.contains(&task) {
            self.queue.push_back(task);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take everything scheduled so far; work scheduled while it runs waits
    /// for the following tick
    pub fn drain(&mut self) -> Vec<Deferred> {
        self.queue.drain(..).collect()
    }
}
