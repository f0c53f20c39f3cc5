//! Owned board state with a dispatch entry point.
//!
//! `BoardStore` is the single writer: it holds the current frozen state,
//! applies actions through [`reduce`] one at a time, and tells an optional
//! [`SnapshotSink`] whenever the canonical data changed so it can be saved.

use kanban_core::Frozen;
use serde_json::Value;

use crate::action::Action;
use crate::filter::{FilterProjection, ProjectionCache};
use crate::reducer::reduce;
use crate::snapshot::BoardSnapshot;
use crate::state::BoardState;

/// Anything that accepts actions.
pub trait Dispatch {
    fn dispatch(&mut self, action: Action);
}

/// Collects actions instead of applying them.
impl Dispatch for Vec<Action> {
    fn dispatch(&mut self, action: Action) {
        self.push(action);
    }
}

/// Receives every newly published canonical snapshot.
///
/// Filter changes do not produce a new snapshot and are not reported.
pub trait SnapshotSink: Send {
    fn publish(&self, snapshot: &Frozen<BoardSnapshot>);
}

pub struct BoardStore {
    state: Frozen<BoardState>,
    sink: Option<Box<dyn SnapshotSink>>,
    projection: ProjectionCache,
}

impl BoardStore {
    /// Store holding the default empty board.
    pub fn new() -> Self {
        Self::with_state(BoardState::initial())
    }

    pub fn with_state(state: BoardState) -> Self {
        Self {
            state: Frozen::new(state),
            sink: None,
            projection: ProjectionCache::new(),
        }
    }

    /// Attach a sink that is told about every snapshot change.
    pub fn with_sink(mut self, sink: Box<dyn SnapshotSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn state(&self) -> &Frozen<BoardState> {
        &self.state
    }

    /// Apply `action` and return the resulting state.
    pub fn apply(&mut self, action: Action) -> &Frozen<BoardState> {
        let kind = action.kind();
        let next = reduce(&self.state, action);

        if Frozen::ptr_eq(&next, &self.state) {
            tracing::debug!("{} left the board unchanged", kind);
            return &self.state;
        }

        let snapshot_changed = !Frozen::ptr_eq(next.snapshot_handle(), self.state.snapshot_handle());
        tracing::debug!(
            "Applied {} (history {}, future {})",
            kind,
            next.history().len(),
            next.future().len()
        );
        self.state = next;

        if snapshot_changed {
            if let Some(sink) = &self.sink {
                sink.publish(self.state.snapshot_handle());
            }
        }
        &self.state
    }

    /// Replace the board with a persisted record, or the empty board when
    /// there is none.
    pub fn hydrate(&mut self, payload: Option<Value>) -> &Frozen<BoardState> {
        self.apply(Action::hydrate(payload))
    }

    /// Filtered view of the current state, recomputed only when the snapshot
    /// or the filters changed since the last call.
    pub fn projection(&mut self) -> Frozen<FilterProjection> {
        self.projection.get(&self.state)
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatch for BoardStore {
    fn dispatch(&mut self, action: Action) {
        self.apply(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnId;
    use crate::filter::FilterPatch;
    use crate::task::{Priority, Task};
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        published: Arc<Mutex<Vec<Frozen<BoardSnapshot>>>>,
    }

    impl SnapshotSink for RecordingSink {
        fn publish(&self, snapshot: &Frozen<BoardSnapshot>) {
            self.published.lock().unwrap().push(snapshot.clone());
        }
    }

    fn task(id: &str) -> Task {
        Task::new(id, id, "", Priority::Low, Utc::now())
    }

    #[test]
    fn test_dispatch_advances_state() {
        let mut store = BoardStore::new();
        store.dispatch(Action::add_task(task("a")));
        store.dispatch(Action::move_task("a", ColumnId::Todo, ColumnId::InProgress, 0));

        assert_eq!(store.state().order().in_progress.len(), 1);
        assert_eq!(store.state().history_size(), 2);
    }

    #[test]
    fn test_sink_sees_data_changes_only() {
        let sink = RecordingSink::default();
        let mut store = BoardStore::new().with_sink(Box::new(sink.clone()));

        store.dispatch(Action::add_task(task("a")));
        store.dispatch(Action::set_filter(FilterPatch::text("a")));
        store.dispatch(Action::delete_task("missing"));
        store.dispatch(Action::Undo);

        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].tasks.len(), 1);
        assert!(published[1].tasks.is_empty());
    }

    #[test]
    fn test_hydrate_none_resets() {
        let mut store = BoardStore::new();
        store.dispatch(Action::add_task(task("a")));
        store.hydrate(None);
        assert!(store.state().tasks().is_empty());
        assert!(!store.state().can_undo());
    }

    #[test]
    fn test_projection_follows_state() {
        let mut store = BoardStore::new();
        store.dispatch(Action::add_task(task("alpha")));
        store.dispatch(Action::add_task(task("beta")));
        assert_eq!(store.projection().visible(ColumnId::Todo).len(), 2);

        store.dispatch(Action::set_filter(FilterPatch::text("alp")));
        let projection = store.projection();
        assert_eq!(projection.visible(ColumnId::Todo).len(), 1);
        assert_eq!(projection.badge(ColumnId::Todo), "1 / 2");
    }

    #[test]
    fn test_vec_collects_actions() {
        let mut actions: Vec<Action> = Vec::new();
        actions.dispatch(Action::Undo);
        assert_eq!(actions, vec![Action::Undo]);
    }
}
