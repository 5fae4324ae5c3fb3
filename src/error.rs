//! Error types for todostore
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur in the store
#[derive(Debug, Error)]
pub enum TodoError {
    /// No record file exists for the requested id
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// Reading the counter or a record file failed
    #[error("Failed to read {}: {source}", path.display())]
    StorageReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing, renaming or removing the counter or a record file failed
    #[error("Failed to write {}: {source}", path.display())]
    StorageWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data directory could not be listed
    #[error("Storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The next id does not fit the fixed id width
    #[error("Counter overflow: {value} exceeds the maximum id")]
    CounterOverflow { value: u64 },

    /// The counter file holds something other than a decimal number
    #[error("Corrupt counter in {}: {contents:?}", path.display())]
    CorruptCounter { path: PathBuf, contents: String },
}

impl TodoError {
    pub(crate) fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageReadFailed {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// True for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, TodoError>;
