use async_trait::async_trait;
use kanban_core::KanbanResult;

/// String key/value storage the board record is kept in.
///
/// Implementations decide where values live (memory, files); callers only see
/// whole-value reads and writes. A missing key is `Ok(None)`, not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> KanbanResult<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: String) -> KanbanResult<()>;

    /// Delete `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> KanbanResult<()>;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    /// Serialize data to text
    fn serialize(&self, data: &T) -> KanbanResult<String>;

    /// Deserialize data from text
    fn deserialize(&self, text: &str) -> KanbanResult<T>;
}
