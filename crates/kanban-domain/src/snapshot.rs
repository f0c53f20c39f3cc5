//! Point-in-time capture of the board's canonical data.
//!
//! A `BoardSnapshot` is what undo/redo history stores and what gets written
//! to storage: the tasks and the per-column ordering, nothing transient.

use kanban_core::{clone_through_json, KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::column::{ColumnId, ColumnMap};
use crate::task::{Task, TaskId, TaskStatus};
use crate::validation::validate_board_value;

pub type TaskMap = BTreeMap<TaskId, Task>;
pub type ColumnOrder = ColumnMap<Vec<TaskId>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub tasks: TaskMap,
    pub order: ColumnOrder,
}

impl BoardSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.order.iter().all(|(_, ids)| ids.is_empty())
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    /// First column whose order lists `id`.
    pub fn column_of(&self, id: &str) -> Option<ColumnId> {
        self.order
            .iter()
            .find(|(_, ids)| ids.iter().any(|tid| tid.as_str() == id))
            .map(|(column, _)| column)
    }

    /// Verify that every ordered id has a task and that every id is listed in
    /// exactly one column, exactly once.
    pub fn check_consistency(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for (column, ids) in self.order.iter() {
            for id in ids {
                if !self.tasks.contains_key(id) {
                    return Err(format!("{} lists unknown task {}", column, id));
                }
                if !seen.insert(id) {
                    return Err(format!("task {} is listed more than once", id));
                }
            }
        }
        if let Some(orphan) = self.tasks.keys().find(|id| !seen.contains(id)) {
            return Err(format!("task {} is not in any column", orphan));
        }
        Ok(())
    }

    /// Build a snapshot from untrusted JSON, e.g. a persisted record.
    ///
    /// The outer shape must pass [`validate_board_value`]. Inside it, tasks
    /// that do not deserialize are rebuilt with [`Task::salvage`], and the
    /// order is repaired so the result is always consistent: ids with no task
    /// and repeated ids are dropped, and tasks listed nowhere are appended to
    /// the column of their status.
    pub fn from_value(value: &Value) -> KanbanResult<Self> {
        validate_board_value(value).map_err(|e| KanbanError::Validation(e.to_string()))?;

        let listed = ColumnMap::from_fn(|column| {
            value["order"][column.key()]
                .as_array()
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| match id.as_str() {
                            Some(id) => Some(TaskId::new(id)),
                            None => {
                                tracing::warn!("Skipping non-string id in {}: {}", column, id);
                                None
                            }
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        });
        let listed_column = |key: &str| {
            listed
                .iter()
                .find(|(_, ids)| ids.iter().any(|id| id.as_str() == key))
                .map(|(column, _)| column)
        };

        let mut tasks = TaskMap::new();
        if let Some(raw_tasks) = value.get("tasks").and_then(Value::as_object) {
            for (key, raw) in raw_tasks {
                let task = match clone_through_json::<_, Task>(raw) {
                    Ok(mut task) => {
                        if task.id.as_str() != key {
                            tracing::warn!("Task stored under {} carries id {}", key, task.id);
                            task.id = TaskId::new(key.as_str());
                        }
                        task
                    }
                    Err(e) => {
                        let status = listed_column(key.as_str())
                            .map_or(TaskStatus::Todo, ColumnId::status);
                        match Task::salvage(key.as_str(), raw, status) {
                            Some(task) => {
                                tracing::warn!("Recovered malformed task {}: {}", key, e);
                                task
                            }
                            None => {
                                tracing::warn!("Dropping unreadable task {}: {}", key, e);
                                continue;
                            }
                        }
                    }
                };
                tasks.insert(task.id.clone(), task);
            }
        }

        let mut seen = HashSet::new();
        let mut order = ColumnMap::from_fn(|column| {
            listed[column]
                .iter()
                .filter(|id| {
                    if !tasks.contains_key(*id) {
                        tracing::warn!("Dropping {} from {}: no such task", id, column);
                        return false;
                    }
                    seen.insert((*id).clone())
                })
                .cloned()
                .collect::<Vec<_>>()
        });
        for task in tasks.values().filter(|task| !seen.contains(&task.id)) {
            tracing::warn!("Task {} is in no column, appending it", task.id);
            order[task.status.column()].push(task.id.clone());
        }

        Ok(Self { tasks, order })
    }
}
