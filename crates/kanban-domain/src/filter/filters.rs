//! Filter settings.
//!
//! `Filters` is transient view state: it lives in the board state but is never
//! persisted and never recorded in undo/redo history.

use serde::{Deserialize, Serialize};

use crate::field_update::FieldUpdate;
use crate::filter::task_filter::{CompositeFilter, PriorityFilter, TextFilter};
use crate::task::Priority;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Case-insensitive substring matched against title and description.
    pub text: String,
    /// Exact priority to keep, or every priority when `None`.
    pub priority: Option<Priority>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any filter is active.
    pub fn has_active_filters(&self) -> bool {
        !self.text.is_empty() || self.priority.is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.priority = None;
    }

    /// Merge a partial update over these filters.
    pub fn merge(&self, patch: FilterPatch) -> Self {
        let mut next = self.clone();
        if let Some(text) = patch.text {
            next.text = text;
        }
        patch.priority.apply_to(&mut next.priority);
        next
    }

    /// Build the matcher for these settings.
    pub fn to_filter(&self) -> CompositeFilter {
        let mut filter = CompositeFilter::new();
        if let Some(priority) = self.priority {
            filter = filter.with_filter(Box::new(PriorityFilter::new(priority)));
        }
        let text = TextFilter::new(&self.text);
        if !text.is_empty() {
            filter = filter.with_filter(Box::new(text));
        }
        filter
    }
}

/// Partial update of [`Filters`]; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_no_change")]
    pub priority: FieldUpdate<Priority>,
}

impl FilterPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn priority(priority: Option<Priority>) -> Self {
        Self {
            priority: FieldUpdate::from(priority),
            ..Self::default()
        }
    }

    /// Patch that resets every filter.
    pub fn clear() -> Self {
        Self {
            text: Some(String::new()),
            priority: FieldUpdate::Clear,
        }
    }
}
