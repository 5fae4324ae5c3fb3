//! Storage layer for todostore - one file per todo plus a shared counter.
//!
//! `FileStore` is the directory-backed implementation of `TodoStore`. It
//! asks the `Sequence` for ids on create and goes to disk for everything
//! else.
//!
//! # Example
//!
//! ```ignore
//! use todostore::config::StorageConfig;
//! use todostore::storage::{FileStore, TodoStore};
//!
//! let store = FileStore::open(&StorageConfig::under("/tmp/todos")).await?;
//! let todo = store.create("buy milk").await?;
//! let all = store.read_all().await?;
//! ```

mod files;
mod traits;

pub use files::{FileStore, RECORD_EXT};
pub use traits::TodoStore;
