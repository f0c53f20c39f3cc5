//! The action surface: every way the board state can change.
//!
//! Serialized adjacently tagged, e.g.
//! `{"type": "MOVE_TASK", "payload": {"taskId": "t1", "sourceColumn": "todo", ...}}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::ColumnId;
use crate::filter::FilterPatch;
use crate::task::{Task, TaskId, TaskPatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Insert a new task at the end of the `todo` column.
    AddTask(Task),

    #[serde(rename_all = "camelCase")]
    UpdateTask {
        id: TaskId,
        patch: TaskPatch,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        updated_at: DateTime<Utc>,
    },

    DeleteTask { id: TaskId },

    /// `target_index` is a position in the target column's master order, after
    /// the task has been taken out of its source column. Out-of-range values
    /// are clamped.
    #[serde(rename_all = "camelCase")]
    MoveTask {
        task_id: TaskId,
        source_column: ColumnId,
        target_column: ColumnId,
        target_index: i64,
    },

    SetFilter(FilterPatch),

    Undo,

    Redo,

    /// Replace the board with untrusted data, typically a persisted record.
    Hydrate(Value),
}

impl Action {
    pub fn add_task(task: Task) -> Self {
        Action::AddTask(task)
    }

    pub fn update_task(id: impl Into<TaskId>, patch: TaskPatch, updated_at: DateTime<Utc>) -> Self {
        Action::UpdateTask {
            id: id.into(),
            patch,
            updated_at,
        }
    }

    pub fn delete_task(id: impl Into<TaskId>) -> Self {
        Action::DeleteTask { id: id.into() }
    }

    pub fn move_task(
        task_id: impl Into<TaskId>,
        source_column: ColumnId,
        target_column: ColumnId,
        target_index: i64,
    ) -> Self {
        Action::MoveTask {
            task_id: task_id.into(),
            source_column,
            target_column,
            target_index,
        }
    }

    pub fn set_filter(patch: FilterPatch) -> Self {
        Action::SetFilter(patch)
    }

    pub fn hydrate(payload: Option<Value>) -> Self {
        Action::Hydrate(payload.unwrap_or(Value::Null))
    }

    /// Wire name of the action, as used in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddTask(_) => "ADD_TASK",
            Action::UpdateTask { .. } => "UPDATE_TASK",
            Action::DeleteTask { .. } => "DELETE_TASK",
            Action::MoveTask { .. } => "MOVE_TASK",
            Action::SetFilter(_) => "SET_FILTER",
            Action::Undo => "UNDO",
            Action::Redo => "REDO",
            Action::Hydrate(_) => "HYDRATE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use serde_json::json;

    #[test]
    fn test_move_task_wire_format() {
        let action = Action::move_task("t1", ColumnId::Todo, ColumnId::InProgress, 2);
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "MOVE_TASK",
                "payload": {
                    "taskId": "t1",
                    "sourceColumn": "todo",
                    "targetColumn": "inProgress",
                    "targetIndex": 2
                }
            })
        );
    }

    #[test]
    fn test_parse_unit_actions() {
        let undo: Action = serde_json::from_str(r#"{"type": "UNDO"}"#).unwrap();
        assert_eq!(undo, Action::Undo);
        let redo: Action = serde_json::from_str(r#"{"type": "REDO"}"#).unwrap();
        assert_eq!(redo, Action::Redo);
    }

    #[test]
    fn test_parse_update_and_filter() {
        let update: Action = serde_json::from_value(json!({
            "type": "UPDATE_TASK",
            "payload": { "id": "t1", "patch": { "priority": 3 }, "updatedAt": 5000 }
        }))
        .unwrap();
        match update {
            Action::UpdateTask { id, patch, updated_at } => {
                assert_eq!(id.as_str(), "t1");
                assert_eq!(patch.priority, Some(Priority::High));
                assert_eq!(updated_at.timestamp_millis(), 5000);
            }
            other => panic!("unexpected action {:?}", other),
        }

        let filter: Action =
            serde_json::from_value(json!({ "type": "SET_FILTER", "payload": { "text": "bug" } }))
                .unwrap();
        assert_eq!(filter, Action::set_filter(FilterPatch::text("bug")));
    }

    #[test]
    fn test_hydrate_keeps_raw_payload() {
        let action: Action =
            serde_json::from_value(json!({ "type": "HYDRATE", "payload": { "tasks": [] } }))
                .unwrap();
        assert_eq!(action, Action::Hydrate(json!({ "tasks": [] })));
        assert_eq!(Action::hydrate(None), Action::Hydrate(Value::Null));
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<Action>(r#"{"type": "ARCHIVE_TASK"}"#).is_err());
    }

    #[test]
    fn test_kind() {
        assert_eq!(Action::Undo.kind(), "UNDO");
        assert_eq!(Action::delete_task("x").kind(), "DELETE_TASK");
        assert_eq!(Action::hydrate(None).kind(), "HYDRATE");
    }
}
