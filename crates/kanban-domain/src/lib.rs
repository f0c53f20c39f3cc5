pub mod action;
pub mod column;
pub mod drag;
pub mod field_update;
pub mod filter;
pub mod history;
pub mod operations;
pub mod reducer;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod task;
pub mod validation;

pub use action::Action;
pub use column::{ColumnId, ColumnMap};
pub use drag::{DragCoordinator, DragState, DropIndicator, TASK_ROW_HEIGHT};
pub use field_update::FieldUpdate;
pub use filter::{FilterPatch, FilterProjection, Filters, ProjectionCache, TaskFilter};
pub use history::{HistoryStack, MAX_HISTORY};
pub use operations::{new_task, update_patch, TaskDraft, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
pub use reducer::reduce;
pub use snapshot::BoardSnapshot;
pub use state::BoardState;
pub use store::{BoardStore, Dispatch, SnapshotSink};
pub use task::{Priority, Task, TaskId, TaskPatch, TaskStatus};
pub use validation::{is_valid_board_value, validate_board_value, SchemaError};
