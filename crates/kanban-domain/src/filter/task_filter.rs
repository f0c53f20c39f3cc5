//! Task filtering implementations.

use crate::task::{Priority, Task};

/// Trait for filtering tasks by various criteria.
pub trait TaskFilter {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Keep tasks with exactly this priority.
pub struct PriorityFilter {
    priority: Priority,
}

impl PriorityFilter {
    pub fn new(priority: Priority) -> Self {
        Self { priority }
    }
}

impl TaskFilter for PriorityFilter {
    fn matches(&self, task: &Task) -> bool {
        task.priority == self.priority
    }
}

/// Case-insensitive substring match on title or description.
///
/// The needle is trimmed; a blank needle matches every task.
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }
}

impl TaskFilter for TextFilter {
    fn matches(&self, task: &Task) -> bool {
        self.needle.is_empty()
            || task.title.to_lowercase().contains(&self.needle)
            || task.description.to_lowercase().contains(&self.needle)
    }
}

/// Combine multiple filters with AND logic.
///
/// A task matches only if it passes all filters.
pub struct CompositeFilter {
    filters: Vec<Box<dyn TaskFilter>>,
}

impl CompositeFilter {
    /// Create an empty composite filter (matches all tasks).
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Add a filter to the composite (builder pattern).
    pub fn with_filter(mut self, filter: Box<dyn TaskFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Check if the composite has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskFilter for CompositeFilter {
    fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(title: &str, description: &str, priority: Priority) -> Task {
        Task::new("t", title, description, priority, Utc::now())
    }

    #[test]
    fn test_priority_filter() {
        let filter = PriorityFilter::new(Priority::High);
        assert!(filter.matches(&task("A", "", Priority::High)));
        assert!(!filter.matches(&task("A", "", Priority::Low)));
    }

    #[test]
    fn test_text_filter_title_or_description() {
        let filter = TextFilter::new("Login");
        assert!(filter.matches(&task("Fix login page", "", Priority::Low)));
        assert!(filter.matches(&task("Auth", "the LOGIN form breaks", Priority::Low)));
        assert!(!filter.matches(&task("Auth", "signup", Priority::Low)));
    }

    #[test]
    fn test_text_filter_trims_needle() {
        let filter = TextFilter::new("  docs ");
        assert!(filter.matches(&task("Write docs", "", Priority::Low)));

        let blank = TextFilter::new("   ");
        assert!(blank.is_empty());
        assert!(blank.matches(&task("anything", "", Priority::Low)));
    }

    #[test]
    fn test_composite_filter() {
        let high = task("Fix login", "", Priority::High);
        let low = task("Fix login", "", Priority::Low);

        assert!(CompositeFilter::new().matches(&low));

        let composite = CompositeFilter::new()
            .with_filter(Box::new(PriorityFilter::new(Priority::High)))
            .with_filter(Box::new(TextFilter::new("login")));
        assert!(composite.matches(&high));
        assert!(!composite.matches(&low));
    }
}
