pub mod memory;
pub mod schema;
pub mod sqlite;

use async_trait::async_trait;

use crate::core::{AppError, Todo, TodoDraft, TodoPatch};

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create(&self, draft: &TodoDraft) -> Result<Todo, AppError>;
    async fn find(&self, id: i64) -> Result<Todo, AppError>;
    async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Todo, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// All todos, newest first.
    async fn list(&self) -> Result<Vec<Todo>, AppError>;
}
