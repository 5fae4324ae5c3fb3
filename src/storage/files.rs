//! One-file-per-record storage.
//!
//! Each todo lives in `<data_dir>/<id>.txt` and the filename is the only
//! link between an id and its text. Nothing is cached: every call goes to
//! the directory, so external edits and deletes are always visible.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::traits::TodoStore;
use crate::atomic_write::write_atomic;
use crate::config::StorageConfig;
use crate::domain::Todo;
use crate::error::{Result, TodoError};
use crate::id::is_valid_id;
use crate::sequence::Sequence;

/// Extension of record files
pub const RECORD_EXT: &str = "txt";

/// Directory-backed todo store.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
    sequence: Arc<Sequence>,
}

impl FileStore {
    /// Open a store, creating the data directory and the counter file's
    /// parent directory if they do not exist yet.
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)
            .await
            .map_err(|e| TodoError::write_failed(&config.data_dir, e))?;

        if let Some(parent) = config.counter_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TodoError::write_failed(parent, e))?;
        }

        tracing::debug!(
            data_dir = %config.data_dir.display(),
            counter_file = %config.counter_file.display(),
            "Opened file store"
        );

        Ok(Self::with_sequence(
            config.data_dir.clone(),
            Arc::new(Sequence::new(config.counter_file.clone())),
        ))
    }

    /// Build a store over an existing directory and a shared sequence.
    ///
    /// No directories are created.
    pub fn with_sequence(data_dir: impl Into<PathBuf>, sequence: Arc<Sequence>) -> Self {
        Self {
            data_dir: data_dir.into(),
            sequence,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn sequence(&self) -> &Arc<Sequence> {
        &self.sequence
    }

    /// Path of the file for `id`. Callers must validate `id` first.
    fn record_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", id, RECORD_EXT))
    }

    /// Map an id to its record path, or `NotFound` if the id is malformed.
    fn checked_record_path(&self, id: &str) -> Result<PathBuf> {
        if !is_valid_id(id) {
            return Err(TodoError::NotFound(id.to_string()));
        }
        Ok(self.record_path(id))
    }

    async fn write_new_record(&self, path: &Path, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| TodoError::write_failed(path, e))?;

        let written = async {
            file.write_all(text.as_bytes()).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = fs::remove_file(path).await {
                tracing::warn!(path = %path.display(), error = %cleanup, "Failed to remove partial record");
            }
            return Err(TodoError::write_failed(path, e));
        }

        Ok(())
    }
}

/// Read a record's text. Bytes that are not UTF-8 are replaced with U+FFFD.
async fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path).await?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Record is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

/// Id of a directory entry if it names a record file.
fn record_id(path: &Path) -> Option<String> {
    if path.extension()? != RECORD_EXT {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    is_valid_id(stem).then(|| stem.to_string())
}

#[async_trait]
impl TodoStore for FileStore {
    async fn create(&self, text: &str) -> Result<Todo> {
        let id = self.sequence.next_id().await?;
        let path = self.record_path(&id);

        self.write_new_record(&path, text).await?;

        tracing::debug!(id = %id, path = %path.display(), "Created todo");
        Ok(Todo::new(id, text))
    }

    async fn read_all(&self) -> Result<Vec<Todo>> {
        let unavailable = |source: std::io::Error| TodoError::StorageUnavailable {
            path: self.data_dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.data_dir).await.map_err(unavailable)?;
        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
            let path = entry.path();
            let Some(id) = record_id(&path) else {
                continue;
            };
            match entry.file_type().await {
                Ok(file_type) if file_type.is_file() => records.push((id, path)),
                Ok(_) => tracing::warn!(path = %path.display(), "Skipping non-file record entry"),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(TodoError::read_failed(path, e)),
            }
        }

        let reads = records.into_iter().map(|(id, path)| async move {
            match read_text(&path).await {
                Ok(text) => Ok(Some(Todo::new(id, text))),
                // Deleted between listing and reading
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(TodoError::read_failed(path, e)),
            }
        });

        let mut todos: Vec<Todo> = try_join_all(reads).await?.into_iter().flatten().collect();
        todos.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::debug!(count = todos.len(), "Read all todos");
        Ok(todos)
    }

    async fn read_one(&self, id: &str) -> Result<Todo> {
        let path = self.checked_record_path(id)?;

        match read_text(&path).await {
            Ok(text) => Ok(Todo::new(id, text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(TodoError::NotFound(id.to_string())),
            Err(e) => Err(TodoError::read_failed(path, e)),
        }
    }

    async fn update(&self, id: &str, text: &str) -> Result<Todo> {
        let path = self.checked_record_path(id)?;

        match fs::metadata(&path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(TodoError::NotFound(id.to_string())),
            Err(e) => return Err(TodoError::read_failed(path, e)),
        }

        // Replaced whole: a failed update leaves the previous text in place.
        // A delete landing between the check and the rename loses to the update.
        write_atomic(&path, text.as_bytes()).await?;

        tracing::debug!(id = %id, "Updated todo");
        Ok(Todo::new(id, text))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.checked_record_path(id)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(id = %id, "Deleted todo");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(TodoError::NotFound(id.to_string())),
            Err(e) => Err(TodoError::write_failed(path, e)),
        }
    }
}
