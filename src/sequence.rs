//! Crash-consistent sequence generator backed by a single counter file.
//!
//! The counter file holds the last issued id as zero-padded decimal text.
//! Every `next_id` reads it, increments, and writes it back through a
//! temporary file and rename while holding the sequence lock, so callers
//! sharing a `Sequence` never see the same id twice.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;

use crate::atomic_write::write_atomic;
use crate::error::{Result, TodoError};
use crate::id::{format_id, parse_counter};

/// Issues strictly increasing zero-padded ids.
///
/// Share one instance (usually behind an `Arc`) between everything that
/// allocates ids from the same counter file. Two `Sequence` values over the
/// same path do not coordinate with each other; across processes a losing
/// writer surfaces as a failed create, never as an overwritten record.
#[derive(Debug)]
pub struct Sequence {
    counter_path: PathBuf,
    lock: Mutex<()>,
}

impl Sequence {
    /// Create a sequence over the given counter file.
    ///
    /// Nothing is touched on disk until the first call.
    pub fn new(counter_path: impl Into<PathBuf>) -> Self {
        Self {
            counter_path: counter_path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the counter file.
    pub fn counter_path(&self) -> &Path {
        &self.counter_path
    }

    /// Allocate the next id.
    ///
    /// Fails with `CounterOverflow` once the fixed width is exhausted, in
    /// which case the counter file is left untouched.
    pub async fn next_id(&self) -> Result<String> {
        let _guard = self.lock.lock().await;

        let current = self.read_counter().await?;
        let next = current
            .checked_add(1)
            .ok_or(TodoError::CounterOverflow { value: current })?;
        let id = format_id(next)?;
        write_atomic(&self.counter_path, id.as_bytes()).await?;

        tracing::debug!(id = %id, path = %self.counter_path.display(), "Issued id");
        Ok(id)
    }

    /// Last issued value, 0 if none has been issued yet.
    pub async fn current(&self) -> Result<u64> {
        let _guard = self.lock.lock().await;
        self.read_counter().await
    }

    async fn read_counter(&self) -> Result<u64> {
        let contents = match fs::read_to_string(&self.counter_path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(TodoError::read_failed(&self.counter_path, e)),
        };

        parse_counter(&contents).ok_or_else(|| TodoError::CorruptCounter {
            path: self.counter_path.clone(),
            contents,
        })
    }
}
