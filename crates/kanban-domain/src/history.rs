//! Bounded undo/redo stacks.
//!
//! Both the undo (`history`) and redo (`future`) side of the board state are
//! a `HistoryStack`: most recent entry at the back, capped at
//! [`MAX_HISTORY`] entries with the oldest evicted first. Entries are frozen
//! snapshots, so pushing the current state only shares it.

use kanban_core::Frozen;
use std::collections::VecDeque;

use crate::snapshot::BoardSnapshot;

/// Maximum number of snapshots kept on either stack.
pub const MAX_HISTORY: usize = 15;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStack {
    entries: VecDeque<Frozen<BoardSnapshot>>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot, evicting the oldest entry beyond the cap.
    pub fn push(&mut self, snapshot: Frozen<BoardSnapshot>) {
        self.entries.push_back(snapshot);
        while self.entries.len() > MAX_HISTORY {
            self.entries.pop_front();
        }
    }

    /// Pop most recent snapshot for restoration.
    pub fn pop(&mut self) -> Option<Frozen<BoardSnapshot>> {
        self.entries.pop_back()
    }

    pub fn last(&self) -> Option<&Frozen<BoardSnapshot>> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Frozen<BoardSnapshot>> {
        self.entries.iter()
    }
}
