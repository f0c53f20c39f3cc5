//! Drag-and-drop coordination between the rendered columns and the reducer.
//!
//! The coordinator owns the state of one drag gesture (which task, from which
//! column) and the drop indicator of each column. It never touches board
//! state directly: a drop is turned into a `MoveTask` action whose index is
//! expressed in the master order, even when the column is filtered.

use crate::action::Action;
use crate::column::{ColumnId, ColumnMap};
use crate::filter::FilterProjection;
use crate::store::Dispatch;
use crate::task::TaskId;

/// Height of a task row in the column lists, in pixels.
pub const TASK_ROW_HEIGHT: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub task_id: TaskId,
    pub source_column: ColumnId,
}

/// Insertion marker shown while hovering over a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropIndicator {
    pub visible: bool,
    /// Offset from the top of the list, in pixels.
    pub top: usize,
}

#[derive(Debug, Clone)]
pub struct DragCoordinator {
    drag: Option<DragState>,
    indicators: ColumnMap<DropIndicator>,
    row_height: usize,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::with_row_height(TASK_ROW_HEIGHT)
    }

    pub fn with_row_height(row_height: usize) -> Self {
        Self {
            drag: None,
            indicators: ColumnMap::default(),
            row_height,
        }
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn indicator(&self, column: ColumnId) -> DropIndicator {
        self.indicators[column]
    }

    /// Row under the pointer. `pointer_y` is relative to the top of the list
    /// container, `scroll_top` is how far the list is scrolled.
    pub fn row_index(&self, pointer_y: f64, scroll_top: usize) -> usize {
        let y = pointer_y + scroll_top as f64;
        if self.row_height == 0 || y.is_nan() || y <= 0.0 {
            return 0;
        }
        (y / self.row_height as f64).floor() as usize
    }

    /// Start a gesture. Any gesture still in flight is replaced.
    pub fn drag_start(&mut self, task_id: TaskId, source_column: ColumnId) {
        if let Some(previous) = &self.drag {
            tracing::debug!("Replacing unfinished drag of {}", previous.task_id);
        }
        self.drag = Some(DragState {
            task_id,
            source_column,
        });
    }

    /// Pointer moved over `column`: place its drop indicator. Returns the row
    /// index under the pointer.
    pub fn drag_over(&mut self, column: ColumnId, pointer_y: f64, scroll_top: usize) -> usize {
        let index = self.row_index(pointer_y, scroll_top);
        self.indicators[column] = DropIndicator {
            visible: true,
            top: index.saturating_mul(self.row_height),
        };
        index
    }

    /// Finish the gesture over `target_column` and dispatch the move.
    ///
    /// The row index is computed from the pointer like [`Self::drag_over`]
    /// and, while filters are active, translated to the master order through
    /// `projection`. Returns the dispatched action, or `None` when no drag
    /// was in progress.
    pub fn drop(
        &mut self,
        dispatcher: &mut impl Dispatch,
        target_column: ColumnId,
        pointer_y: f64,
        scroll_top: usize,
        projection: &FilterProjection,
    ) -> Option<Action> {
        let drag = self.drag.take()?;

        let visible_index = self.row_index(pointer_y, scroll_top);
        let master_index = projection.resolve_drop_index(target_column, visible_index);

        let action = Action::move_task(
            drag.task_id,
            drag.source_column,
            target_column,
            i64::try_from(master_index).unwrap_or(i64::MAX),
        );
        dispatcher.dispatch(action.clone());

        self.indicators[target_column].visible = false;
        Some(action)
    }

    /// Gesture ended, with or without a drop: forget it and hide every
    /// indicator.
    pub fn drag_end(&mut self) {
        self.drag = None;
        for column in ColumnId::ALL {
            self.indicators[column].visible = false;
        }
    }
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
