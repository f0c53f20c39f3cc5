//! Filtered per-column view of the board.
//!
//! Rows are rendered from the filtered order, but moves must be expressed in
//! the master (unfiltered) order. The projection carries both, plus a reverse
//! map from task id to master index, so a drop position taken from the visible
//! rows can be translated back.

use kanban_core::Frozen;
use std::collections::HashMap;

use crate::column::{ColumnId, ColumnMap};
use crate::filter::filters::Filters;
use crate::filter::task_filter::TaskFilter;
use crate::snapshot::BoardSnapshot;
use crate::state::BoardState;
use crate::task::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterProjection {
    filtered_order: ColumnMap<Vec<TaskId>>,
    master_index: ColumnMap<HashMap<TaskId, usize>>,
    totals: ColumnMap<usize>,
    has_active_filters: bool,
}

impl FilterProjection {
    /// Project `snapshot` through `filters`.
    ///
    /// Ids listed in a column without a matching task are left out of the
    /// filtered order.
    pub fn compute(snapshot: &BoardSnapshot, filters: &Filters) -> Self {
        let matcher = filters.to_filter();

        let filtered_order = snapshot.order.map(|_, ids| {
            ids.iter()
                .filter(|id| snapshot.tasks.get(*id).is_some_and(|task| matcher.matches(task)))
                .cloned()
                .collect()
        });

        let master_index = snapshot.order.map(|_, ids| {
            ids.iter()
                .enumerate()
                .map(|(index, id)| (id.clone(), index))
                .collect()
        });

        Self {
            filtered_order,
            master_index,
            totals: snapshot.order.map(|_, ids| ids.len()),
            has_active_filters: filters.has_active_filters(),
        }
    }

    pub fn from_state(state: &BoardState) -> Self {
        Self::compute(state.snapshot(), state.filters())
    }

    /// Ids to render in `column`, in master order.
    pub fn visible(&self, column: ColumnId) -> &[TaskId] {
        &self.filtered_order[column]
    }

    pub fn filtered_order(&self) -> &ColumnMap<Vec<TaskId>> {
        &self.filtered_order
    }

    /// Position of `id` in the unfiltered order of `column`.
    pub fn master_index(&self, column: ColumnId, id: &str) -> Option<usize> {
        self.master_index[column].get(id).copied()
    }

    pub fn has_active_filters(&self) -> bool {
        self.has_active_filters
    }

    /// Translate a row index in the visible list of `column` into an index in
    /// the master order.
    ///
    /// Without active filters both orders coincide. With filters, the row's
    /// task is looked up in the reverse map; past the end of the filtered list
    /// there is no task and the raw index is returned.
    pub fn resolve_drop_index(&self, column: ColumnId, visible_index: usize) -> usize {
        if !self.has_active_filters {
            return visible_index;
        }
        self.filtered_order[column]
            .get(visible_index)
            .and_then(|id| self.master_index(column, id.as_str()))
            .unwrap_or(visible_index)
    }

    /// Count shown in the column header: `shown / total` while filtering.
    pub fn badge(&self, column: ColumnId) -> String {
        let total = self.totals[column];
        if self.has_active_filters {
            format!("{} / {}", self.filtered_order[column].len(), total)
        } else {
            total.to_string()
        }
    }
}

/// Reuses the last projection while the snapshot and filters are unchanged.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    last: Option<(Frozen<BoardSnapshot>, Filters, Frozen<FilterProjection>)>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, state: &BoardState) -> Frozen<FilterProjection> {
        if let Some((snapshot, filters, projection)) = &self.last {
            if Frozen::ptr_eq(snapshot, state.snapshot_handle()) && filters == state.filters() {
                return projection.clone();
            }
        }

        let projection = Frozen::new(FilterProjection::from_state(state));
        self.last = Some((
            state.snapshot_handle().clone(),
            state.filters().clone(),
            projection.clone(),
        ));
        projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filters::FilterPatch;
    use crate::task::{Priority, Task};
    use chrono::Utc;

    fn snapshot_with(column: ColumnId, tasks: &[(&str, &str, Priority)]) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::new();
        for (id, title, priority) in tasks {
            let task = Task::new(*id, *title, "", *priority, Utc::now());
            snapshot.order[column].push(task.id.clone());
            snapshot.tasks.insert(task.id.clone(), task);
        }
        snapshot
    }

    fn ids(list: &[TaskId]) -> Vec<&str> {
        list.iter().map(TaskId::as_str).collect()
    }

    #[test]
    fn test_no_filters_shows_everything() {
        let snapshot = snapshot_with(
            ColumnId::Todo,
            &[("a", "A", Priority::Low), ("b", "B", Priority::High)],
        );
        let projection = FilterProjection::compute(&snapshot, &Filters::default());

        assert!(!projection.has_active_filters());
        assert_eq!(ids(projection.visible(ColumnId::Todo)), vec!["a", "b"]);
        assert_eq!(projection.badge(ColumnId::Todo), "2");
    }

    #[test]
    fn test_priority_and_text_combine() {
        let snapshot = snapshot_with(
            ColumnId::Todo,
            &[
                ("a", "Fix login", Priority::High),
                ("b", "Fix signup", Priority::High),
                ("c", "Fix login copy", Priority::Low),
            ],
        );
        let filters = Filters::new()
            .merge(FilterPatch::text("LOGIN"))
            .merge(FilterPatch::priority(Some(Priority::High)));
        let projection = FilterProjection::compute(&snapshot, &filters);

        assert_eq!(ids(projection.visible(ColumnId::Todo)), vec!["a"]);
        assert_eq!(projection.badge(ColumnId::Todo), "1 / 3");
    }

    #[test]
    fn test_orphan_ids_are_hidden() {
        let mut snapshot = snapshot_with(ColumnId::Done, &[("a", "A", Priority::Low)]);
        snapshot.order.done.push(TaskId::from("ghost"));

        let projection = FilterProjection::compute(&snapshot, &Filters::default());
        assert_eq!(ids(projection.visible(ColumnId::Done)), vec!["a"]);
        assert_eq!(projection.master_index(ColumnId::Done, "ghost"), Some(1));
    }

    #[test]
    fn test_drop_index_remapped_through_hidden_rows() {
        let snapshot = snapshot_with(
            ColumnId::Todo,
            &[
                ("a", "alpha", Priority::Low),
                ("b", "beta", Priority::High),
                ("c", "gamma", Priority::Low),
            ],
        );
        let filters = Filters::new().merge(FilterPatch::priority(Some(Priority::Low)));
        let projection = FilterProjection::compute(&snapshot, &filters);

        assert_eq!(ids(projection.visible(ColumnId::Todo)), vec!["a", "c"]);
        assert_eq!(projection.resolve_drop_index(ColumnId::Todo, 0), 0);
        assert_eq!(projection.resolve_drop_index(ColumnId::Todo, 1), 2);
        // Past the end of the filtered list: raw index.
        assert_eq!(projection.resolve_drop_index(ColumnId::Todo, 2), 2);
        assert_eq!(projection.resolve_drop_index(ColumnId::Todo, 9), 9);
    }

    #[test]
    fn test_drop_index_untouched_without_filters() {
        let snapshot = snapshot_with(ColumnId::Todo, &[("a", "A", Priority::Low)]);
        let projection = FilterProjection::compute(&snapshot, &Filters::default());
        assert_eq!(projection.resolve_drop_index(ColumnId::Todo, 5), 5);
    }

    #[test]
    fn test_cache_reuses_until_inputs_change() {
        let snapshot = snapshot_with(ColumnId::Todo, &[("a", "A", Priority::Low)]);
        let state = BoardState::from_snapshot(snapshot);
        let mut cache = ProjectionCache::new();

        let first = cache.get(&state);
        let second = cache.get(&state);
        assert!(Frozen::ptr_eq(&first, &second));

        let filtered = state.with_filters(state.filters().merge(FilterPatch::text("zzz")));
        let third = cache.get(&filtered);
        assert!(!Frozen::ptr_eq(&first, &third));
        assert!(third.visible(ColumnId::Todo).is_empty());
    }
}
