//! Task filtering and the filtered view of the board.
//!
//! Provides the filter settings carried in the board state, the `TaskFilter`
//! trait with its implementations, and the per-column projection used for
//! rendering and for translating drop positions back to the master order.

pub mod filters;
pub mod projection;
pub mod task_filter;

pub use filters::{FilterPatch, Filters};
pub use projection::{FilterProjection, ProjectionCache};
pub use task_filter::{CompositeFilter, PriorityFilter, TaskFilter, TextFilter};
