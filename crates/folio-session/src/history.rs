#![forbid(unsafe_code)]

//! Snapshot-based undo/redo.
//!
//! Each accepted edit pushes a full session snapshot. Snapshots are shared
//! through `Arc`, so undo and redo only move pointers between two stacks.
//!
//! # Invariants
//!
//! 1. The back of the undo stack is the current state.
//! 2. `undo_stack.len() <= max_depth` after every push.
//! 3. Pushing clears the redo stack.
//! 4. Undo needs at least two entries: the current state and one to go back to.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use folio_core::TreeStore;

use crate::settings::ResourceSettings;

/// Default number of retained snapshots.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// State captured for one history step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub tree: TreeStore,
    pub settings: ResourceSettings,
}

/// Bounded undo/redo stack of snapshots.
pub struct History<T> {
    undo_stack: VecDeque<Arc<T>>,
    redo_stack: VecDeque<Arc<T>>,
    max_depth: usize,
}

impl<T: fmt::Debug> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl<T> History<T> {
    /// A depth of 0 is treated as 1: the current state is always kept.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record a new current state.
    pub fn push(&mut self, state: T) {
        self.redo_stack.clear();
        self.undo_stack.push_back(Arc::new(state));
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Step back; returns the state that is now current.
    pub fn undo(&mut self) -> Option<Arc<T>> {
        if self.undo_stack.len() < 2 {
            return None;
        }
        let current = self.undo_stack.pop_back()?;
        self.redo_stack.push_back(current);
        self.undo_stack.back().cloned()
    }

    /// Step forward; returns the state that is now current.
    pub fn redo(&mut self) -> Option<Arc<T>> {
        let snapshot = self.redo_stack.pop_back()?;
        self.undo_stack.push_back(snapshot);
        self.undo_stack.back().cloned()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Arc<T>> {
        self.undo_stack.back()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() >= 2
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}
