//! The board state machine.
//!
//! `reduce` is a pure, total function: every (state, action) pair yields a
//! state. Actions that target a missing task, undo/redo with nothing to
//! restore, and duplicate inserts return the input state unchanged (the very
//! same frozen value). Nothing here returns an error.

use kanban_core::Frozen;
use serde_json::Value;

use crate::action::Action;
use crate::column::ColumnId;
use crate::filter::{FilterPatch, Filters};
use crate::history::HistoryStack;
use crate::snapshot::BoardSnapshot;
use crate::state::BoardState;
use crate::task::{Task, TaskId, TaskPatch, TaskStatus};
use chrono::{DateTime, Utc};

pub fn reduce(state: &Frozen<BoardState>, action: Action) -> Frozen<BoardState> {
    match action {
        Action::AddTask(task) => add_task(state, task),
        Action::UpdateTask {
            id,
            patch,
            updated_at,
        } => update_task(state, &id, patch, updated_at),
        Action::DeleteTask { id } => delete_task(state, &id),
        Action::MoveTask {
            task_id,
            source_column,
            target_column,
            target_index,
        } => move_task(state, task_id, source_column, target_column, target_index),
        Action::SetFilter(patch) => set_filter(state, patch),
        Action::Undo => undo(state),
        Action::Redo => redo(state),
        Action::Hydrate(payload) => hydrate(&payload),
    }
}

/// Publish `snapshot` as the new canonical data, recording the state being
/// left as an undo step and dropping the redo stack.
fn commit(state: &BoardState, snapshot: BoardSnapshot) -> Frozen<BoardState> {
    let mut history = state.history.clone();
    history.push(state.snapshot.clone());

    Frozen::new(BoardState {
        snapshot: Frozen::new(snapshot),
        filters: state.filters.clone(),
        history,
        future: HistoryStack::new(),
    })
}

fn clamp_index(index: i64, len: usize) -> usize {
    usize::try_from(index).map_or(0, |index| index.min(len))
}

fn add_task(state: &Frozen<BoardState>, mut task: Task) -> Frozen<BoardState> {
    if state.snapshot.contains(task.id.as_str()) {
        tracing::debug!("ADD_TASK ignored: task {} already exists", task.id);
        return state.clone();
    }

    task.status = TaskStatus::Todo;
    task.updated_at = task.updated_at.max(task.created_at);

    let mut snapshot = state.snapshot.thaw();
    snapshot.order.todo.push(task.id.clone());
    snapshot.tasks.insert(task.id.clone(), task);
    commit(state, snapshot)
}

fn update_task(
    state: &Frozen<BoardState>,
    id: &TaskId,
    patch: TaskPatch,
    updated_at: DateTime<Utc>,
) -> Frozen<BoardState> {
    if !state.snapshot.contains(id.as_str()) {
        tracing::debug!("UPDATE_TASK ignored: no task {}", id);
        return state.clone();
    }

    let mut snapshot = state.snapshot.thaw();
    if let Some(task) = snapshot.tasks.get_mut(id) {
        patch.apply_to(task);
        task.updated_at = updated_at.max(task.updated_at);
    }
    commit(state, snapshot)
}

fn delete_task(state: &Frozen<BoardState>, id: &TaskId) -> Frozen<BoardState> {
    if !state.snapshot.contains(id.as_str()) && state.snapshot.column_of(id.as_str()).is_none() {
        tracing::debug!("DELETE_TASK ignored: no task {}", id);
        return state.clone();
    }

    let mut snapshot = state.snapshot.thaw();
    snapshot.tasks.remove(id);
    // Every column, not only the one the task should be in: hydrated data may
    // list an id more than once.
    for column in ColumnId::ALL {
        snapshot.order[column].retain(|tid| tid != id);
    }
    commit(state, snapshot)
}

fn move_task(
    state: &Frozen<BoardState>,
    task_id: TaskId,
    source_column: ColumnId,
    target_column: ColumnId,
    target_index: i64,
) -> Frozen<BoardState> {
    if !state.snapshot.contains(task_id.as_str()) {
        tracing::debug!("MOVE_TASK ignored: no task {}", task_id);
        return state.clone();
    }

    let mut snapshot = state.snapshot.thaw();

    // The id leaves every column so a stale source column cannot leave a
    // second copy behind. For a move within one column the index therefore
    // refers to the list with the task already taken out.
    for column in ColumnId::ALL {
        snapshot.order[column].retain(|tid| tid != &task_id);
    }

    let target = &mut snapshot.order[target_column];
    let insert_at = clamp_index(target_index, target.len());
    target.insert(insert_at, task_id.clone());

    // Status follows the column the task lands in, whatever the source says.
    if let Some(task) = snapshot.tasks.get_mut(&task_id) {
        task.status = target_column.status();
    }

    tracing::debug!(
        "Moved {} from {} to {} at {}",
        task_id,
        source_column,
        target_column,
        insert_at
    );
    commit(state, snapshot)
}

fn set_filter(state: &Frozen<BoardState>, patch: FilterPatch) -> Frozen<BoardState> {
    Frozen::new(state.with_filters(state.filters.merge(patch)))
}

fn undo(state: &Frozen<BoardState>) -> Frozen<BoardState> {
    let mut history = state.history.clone();
    let Some(previous) = history.pop() else {
        return state.clone();
    };

    let mut future = state.future.clone();
    future.push(state.snapshot.clone());

    Frozen::new(BoardState {
        snapshot: previous,
        filters: state.filters.clone(),
        history,
        future,
    })
}

fn redo(state: &Frozen<BoardState>) -> Frozen<BoardState> {
    let mut future = state.future.clone();
    let Some(next) = future.pop() else {
        return state.clone();
    };

    let mut history = state.history.clone();
    history.push(state.snapshot.clone());

    Frozen::new(BoardState {
        snapshot: next,
        filters: state.filters.clone(),
        history,
        future,
    })
}

fn hydrate(payload: &Value) -> Frozen<BoardState> {
    if payload.is_null() {
        tracing::debug!("Nothing to hydrate, starting with an empty board");
        return Frozen::new(BoardState::initial());
    }

    match BoardSnapshot::from_value(payload) {
        Ok(snapshot) => {
            tracing::info!("Hydrated board with {} tasks", snapshot.tasks.len());
            Frozen::new(BoardState {
                snapshot: Frozen::new(snapshot),
                filters: Filters::default(),
                history: HistoryStack::new(),
                future: HistoryStack::new(),
            })
        }
        Err(e) => {
            tracing::warn!("Rejected hydration payload: {}", e);
            Frozen::new(BoardState::initial())
        }
    }
}
