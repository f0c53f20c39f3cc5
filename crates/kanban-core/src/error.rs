use thiserror::Error;

/// Errors surfaced by the board engine's fallible edges: user input,
/// storage and JSON handling. Reducer transitions themselves never fail.
#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// A value could not be copied through its serialized form.
    #[error("Clone failed: {0}")]
    Clone(String),
}

pub type KanbanResult<T> = Result<T, KanbanError>;

impl From<serde_json::Error> for KanbanError {
    fn from(err: serde_json::Error) -> Self {
        KanbanError::Serialization(err.to_string())
    }
}
