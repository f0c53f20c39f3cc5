//! The full board state published to readers.

use kanban_core::Frozen;

use crate::filter::Filters;
use crate::history::HistoryStack;
use crate::snapshot::{BoardSnapshot, ColumnOrder, TaskMap};

/// Canonical snapshot plus transient filters and the undo/redo stacks.
///
/// Values are only ever handed out as `Frozen<BoardState>`; every transition
/// builds a new value and leaves the previous one intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub(crate) snapshot: Frozen<BoardSnapshot>,
    pub(crate) filters: Filters,
    pub(crate) history: HistoryStack,
    pub(crate) future: HistoryStack,
}

impl BoardState {
    /// Default empty board.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Fresh state around `snapshot`: no filters, no history.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        Self {
            snapshot: Frozen::new(snapshot),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Shared handle to the canonical snapshot.
    pub fn snapshot_handle(&self) -> &Frozen<BoardSnapshot> {
        &self.snapshot
    }

    pub fn tasks(&self) -> &TaskMap {
        &self.snapshot.tasks
    }

    pub fn order(&self) -> &ColumnOrder {
        &self.snapshot.order
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn future(&self) -> &HistoryStack {
        &self.future
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn history_size(&self) -> usize {
        self.history.len()
    }

    /// Same board with different filters; shares the snapshot and stacks.
    pub fn with_filters(&self, filters: Filters) -> Self {
        Self {
            filters,
            ..self.clone()
        }
    }
}
