//! todostore - a durable todo store
//!
//! Each todo is one `<id>.txt` file in a data directory. Ids are
//! zero-padded sequence numbers handed out by a crash-consistent counter
//! file that only one writer touches at a time.

mod atomic_write;
pub mod config;
pub mod domain;
pub mod error;
pub mod id;
pub mod sequence;
pub mod storage;

pub use domain::Todo;
pub use error::{Result, TodoError};
pub use sequence::Sequence;
pub use storage::{FileStore, TodoStore};
