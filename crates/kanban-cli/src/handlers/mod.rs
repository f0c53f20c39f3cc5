pub mod list;
pub mod replay;
pub mod task;
