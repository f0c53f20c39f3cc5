pub mod clone;
pub mod config;
pub mod error;
pub mod frozen;
pub mod window;

pub use clone::clone_through_json;
pub use config::AppConfig;
pub use error::{KanbanError, KanbanResult};
pub use frozen::Frozen;
pub use window::{ScrollThrottle, VirtualWindow, WindowSlice};
