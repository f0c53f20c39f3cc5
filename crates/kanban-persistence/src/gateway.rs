//! Reading and writing the board record.
//!
//! The record is the JSON of a [`BoardSnapshot`] stored under one key. Loading
//! never fails: storage errors are logged and treated as "nothing saved", and
//! a record that is unreadable or has the wrong shape is deleted so the next
//! start does not trip over it again.

use crate::serialization::JsonSerializer;
use crate::traits::{KeyValueStore, Serializer};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{validate_board_value, BoardSnapshot};
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
    key: String,
    serializer: JsonSerializer,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            serializer: JsonSerializer::compact(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the saved record as a hydration payload.
    ///
    /// Only `tasks` and `order` are carried over; any other keys in the record
    /// are ignored. Returns `None` when nothing usable is stored.
    pub async fn load(&self) -> Option<Value> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No saved board under {}", self.key);
                return None;
            }
            Err(e @ KanbanError::Serialization(_)) => {
                tracing::warn!("Discarding undecodable board record {}: {}", self.key, e);
                self.discard().await;
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to read saved board {}: {}", self.key, e);
                return None;
            }
        };

        let parsed: Value = match self.serializer.deserialize(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Discarding unreadable board record {}: {}", self.key, e);
                self.discard().await;
                return None;
            }
        };

        let mut candidate = Map::new();
        for field in ["tasks", "order"] {
            if let Some(value) = parsed.get(field) {
                candidate.insert(field.to_string(), value.clone());
            }
        }
        let candidate = Value::Object(candidate);

        if let Err(e) = validate_board_value(&candidate) {
            tracing::warn!("Discarding invalid board record {}: {}", self.key, e);
            self.discard().await;
            return None;
        }

        tracing::info!("Loaded board record {} ({} bytes)", self.key, raw.len());
        Some(candidate)
    }

    /// Write `snapshot` as the saved record.
    pub async fn save(&self, snapshot: &BoardSnapshot) -> KanbanResult<()> {
        let text = self.serializer.serialize(snapshot)?;
        self.store.set(&self.key, text).await
    }

    /// Delete the saved record.
    pub async fn clear(&self) -> KanbanResult<()> {
        self.store.remove(&self.key).await
    }

    async fn discard(&self) {
        if let Err(e) = self.clear().await {
            tracing::warn!("Failed to remove board record {}: {}", self.key, e);
        }
    }
}

impl std::fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::traits::MockKeyValueStore;
    use kanban_domain::{Priority, Task};
    use serde_json::json;

    const KEY: &str = "fluxboard-state";

    fn gateway(store: &MemoryStore) -> PersistenceGateway {
        PersistenceGateway::new(Arc::new(store.clone()), KEY)
    }

    #[tokio::test]
    async fn test_load_nothing_saved() {
        let store = MemoryStore::new();
        assert_eq!(gateway(&store).load().await, None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        let gateway = gateway(&store);

        let mut snapshot = BoardSnapshot::new();
        let task = Task::new("t1", "One", "", Priority::Low, chrono::Utc::now());
        snapshot.order.done.push(task.id.clone());
        snapshot.tasks.insert(task.id.clone(), task);
        gateway.save(&snapshot).await.unwrap();

        let loaded = gateway.load().await.unwrap();
        assert_eq!(BoardSnapshot::from_value(&loaded).unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_extra_keys_are_dropped() {
        let store = MemoryStore::new();
        store.insert(
            KEY,
            json!({
                "tasks": {},
                "order": { "todo": [], "inProgress": [], "done": [] },
                "filters": { "text": "stale" },
                "history": [1, 2]
            })
            .to_string(),
        );

        let loaded = gateway(&store).load().await.unwrap();
        assert_eq!(
            loaded,
            json!({ "tasks": {}, "order": { "todo": [], "inProgress": [], "done": [] } })
        );
        assert!(store.peek(KEY).is_some());
    }

    #[tokio::test]
    async fn test_unparseable_record_is_removed() {
        let store = MemoryStore::new();
        store.insert(KEY, "{\"tasks\":");

        assert_eq!(gateway(&store).load().await, None);
        assert_eq!(store.peek(KEY), None);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_removed() {
        let store = MemoryStore::new();
        store.insert(KEY, json!({ "tasks": {}, "order": { "todo": [] } }).to_string());

        assert_eq!(gateway(&store).load().await, None);
        assert_eq!(store.peek(KEY), None);
    }

    #[tokio::test]
    async fn test_read_error_leaves_record_alone() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Err(KanbanError::Storage("disk on fire".into())));
        mock.expect_remove().never();

        let gateway = PersistenceGateway::new(Arc::new(mock), KEY);
        assert_eq!(gateway.load().await, None);
    }

    #[tokio::test]
    async fn test_undecodable_record_is_removed() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Err(KanbanError::Serialization("not valid UTF-8".into())));
        mock.expect_remove().times(1).returning(|_| Ok(()));

        let gateway = PersistenceGateway::new(Arc::new(mock), KEY);
        assert_eq!(gateway.load().await, None);
    }

    #[tokio::test]
    async fn test_failed_removal_is_swallowed() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get()
            .returning(|_| Ok(Some("not json".to_string())));
        mock.expect_remove()
            .times(1)
            .returning(|_| Err(KanbanError::Storage("read-only".into())));

        let gateway = PersistenceGateway::new(Arc::new(mock), KEY);
        assert_eq!(gateway.load().await, None);
    }
}
