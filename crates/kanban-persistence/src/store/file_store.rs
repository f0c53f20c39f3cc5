use crate::store::atomic_writer::AtomicWriter;
use crate::traits::KeyValueStore;
use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use std::path::{Path, PathBuf};

/// Key/value store keeping each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Keys must be plain file names.
    pub fn path_for(&self, key: &str) -> KanbanResult<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(&['/', '\\', '\0'][..]);
        if !valid {
            return Err(KanbanError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> KanbanResult<Option<String>> {
        AtomicWriter::read_to_string(&self.path_for(key)?).await
    }

    async fn set(&self, key: &str, value: String) -> KanbanResult<()> {
        let path = self.path_for(key)?;
        AtomicWriter::write_atomic(&path, value.as_bytes()).await?;
        tracing::info!("Saved {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> KanbanResult<()> {
        AtomicWriter::remove(&self.path_for(key)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("board").await.unwrap(), None);

        store.set("board", "{\"a\":1}".into()).await.unwrap();
        assert!(dir.path().join("board.json").exists());
        assert_eq!(
            store.get("board").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        store.remove("board").await.unwrap();
        assert_eq!(store.get("board").await.unwrap(), None);
        store.remove("board").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        for key in ["", "..", "../escape", "a/b"] {
            assert!(
                matches!(store.set(key, "x".into()).await, Err(KanbanError::Storage(_))),
                "key {:?} accepted",
                key
            );
        }
    }

    #[tokio::test]
    async fn test_separate_keys_are_separate_files() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("one", "1".into()).await.unwrap();
        store.set("two", "2".into()).await.unwrap();

        assert_eq!(store.get("one").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("two").await.unwrap().as_deref(), Some("2"));
    }
}
