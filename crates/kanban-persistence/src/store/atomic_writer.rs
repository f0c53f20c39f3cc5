use kanban_core::{KanbanError, KanbanResult};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Atomic file writer that prevents data corruption
/// Uses write-to-temp-file → atomic-rename pattern for safety
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically, creating the parent directory if needed.
    /// A crash mid-write leaves the previous contents in place.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        // Same directory as the target so the rename stays on one filesystem
        let temp_path = tempfile::NamedTempFile::new_in(parent)?.into_temp_path();
        fs::write(&temp_path, data).await?;
        temp_path.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a whole file as UTF-8, `None` when it does not exist. Content that
    /// is not UTF-8 is a serialization error, not an I/O one.
    pub async fn read_to_string(path: &Path) -> KanbanResult<Option<String>> {
        match fs::read_to_string(path).await {
            Ok(text) => {
                tracing::debug!("Read {} bytes from {}", text.len(), path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(KanbanError::Serialization(
                format!("{} is not valid UTF-8", path.display()),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a file, treating a missing file as already deleted.
    pub async fn remove(path: &Path) -> KanbanResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
