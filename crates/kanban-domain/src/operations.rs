//! Validated construction of task actions.
//!
//! The reducer trusts its payloads. Anything coming from a user (the CLI,
//! a form) goes through these helpers first so that titles and descriptions
//! stay within bounds.

use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};

use crate::action::Action;
use crate::task::{Priority, Task, TaskId, TaskPatch};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// User input for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Trim both fields and check their lengths.
    pub fn validate(self) -> KanbanResult<Self> {
        Ok(Self {
            title: validate_title(&self.title)?,
            description: validate_description(&self.description)?,
            priority: self.priority,
        })
    }
}

fn validate_title(title: &str) -> KanbanResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(KanbanError::Validation("Title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(KanbanError::Validation(format!(
            "Title must be {} characters or less",
            MAX_TITLE_LEN
        )));
    }
    Ok(title.to_string())
}

fn validate_description(description: &str) -> KanbanResult<String> {
    let description = description.trim();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(KanbanError::Validation(format!(
            "Description must be {} characters or less",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(description.to_string())
}

/// Build a fresh task from a draft, with a generated id and
/// `created_at == updated_at == now`.
pub fn new_task(draft: TaskDraft, now: DateTime<Utc>) -> KanbanResult<Task> {
    let draft = draft.validate()?;
    Ok(Task::new(
        TaskId::generate(),
        draft.title,
        draft.description,
        draft.priority,
        now,
    ))
}

/// Validate a patch and wrap it in an `UpdateTask` action stamped with `now`.
pub fn update_patch(
    id: impl Into<TaskId>,
    patch: TaskPatch,
    now: DateTime<Utc>,
) -> KanbanResult<Action> {
    if patch.is_empty() {
        return Err(KanbanError::Validation("Nothing to update".into()));
    }
    let patch = TaskPatch {
        title: patch.title.as_deref().map(validate_title).transpose()?,
        description: patch
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?,
        priority: patch.priority,
    };
    Ok(Action::update_task(id, patch, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_is_trimmed() {
        let draft = TaskDraft::new("  Write docs  ")
            .with_description("\n details \n")
            .validate()
            .unwrap();
        assert_eq!(draft.title, "Write docs");
        assert_eq!(draft.description, "details");
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = TaskDraft::new("   ").validate().unwrap_err();
        assert!(matches!(err, KanbanError::Validation(_)));
    }

    #[test]
    fn test_title_length_counts_chars() {
        assert!(TaskDraft::new("é".repeat(MAX_TITLE_LEN)).validate().is_ok());
        assert!(TaskDraft::new("x".repeat(MAX_TITLE_LEN + 1))
            .validate()
            .is_err());
    }

    #[test]
    fn test_description_limit() {
        let ok = TaskDraft::new("t").with_description("d".repeat(MAX_DESCRIPTION_LEN));
        assert!(ok.validate().is_ok());

        let too_long = TaskDraft::new("t").with_description("d".repeat(MAX_DESCRIPTION_LEN + 1));
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_new_task_defaults() {
        let now = Utc::now();
        let task = new_task(
            TaskDraft::new("Ship").with_priority(Priority::High),
            now,
        )
        .unwrap();

        assert_eq!(task.title, "Ship");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
        assert!(!task.id.as_str().is_empty());
    }

    #[test]
    fn test_new_task_ids_are_unique() {
        let now = Utc::now();
        let a = new_task(TaskDraft::new("a"), now).unwrap();
        let b = new_task(TaskDraft::new("a"), now).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_patch_validates_fields() {
        let now = Utc::now();
        let action = update_patch(
            "t1",
            TaskPatch {
                title: Some(" Renamed ".into()),
                ..Default::default()
            },
            now,
        )
        .unwrap();

        match action {
            Action::UpdateTask {
                id,
                patch,
                updated_at,
            } => {
                assert_eq!(id.as_str(), "t1");
                assert_eq!(patch.title.as_deref(), Some("Renamed"));
                assert_eq!(updated_at, now);
            }
            other => panic!("unexpected action {:?}", other),
        }

        let blank = TaskPatch {
            title: Some("  ".into()),
            ..Default::default()
        };
        assert!(update_patch("t1", blank, now).is_err());
    }

    #[test]
    fn test_empty_patch_rejected() {
        assert!(update_patch("t1", TaskPatch::default(), Utc::now()).is_err());
    }
}
