//! Storage trait definitions.

use async_trait::async_trait;

use crate::domain::Todo;
use crate::error::Result;

/// CRUD operations over stored todos.
///
/// Every operation reflects what is on disk at call time; implementations
/// must not answer id lookups from a cache that can drift from storage.
/// Stored bytes that are not valid UTF-8 are read back lossily.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Create a new todo with a freshly issued id.
    async fn create(&self, text: &str) -> Result<Todo>;

    /// List every stored todo, ordered by id.
    async fn read_all(&self) -> Result<Vec<Todo>>;

    /// Get a todo by id.
    async fn read_one(&self, id: &str) -> Result<Todo>;

    /// Replace the text of an existing todo. On failure the old text stays.
    async fn update(&self, id: &str, text: &str) -> Result<Todo>;

    /// Delete a todo by id.
    async fn delete(&self, id: &str) -> Result<()>;
}
