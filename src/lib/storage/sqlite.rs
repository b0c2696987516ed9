use chrono::Utc;
use sqlx::SqlitePool;

use crate::core::{AppError, Todo, TodoDraft, TodoPatch, validate_title};
use crate::storage::TodoStore;
use async_trait::async_trait;

#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, title, completed, created_at, updated_at FROM todos WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn create(&self, draft: &TodoDraft) -> Result<Todo, AppError> {
        draft.validate()?;
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO todos (title, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&draft.title)
        .bind(draft.completed)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        let id = result.last_insert_rowid();
        tracing::debug!(id, "created todo");
        self.find(id).await
    }

    async fn find(&self, id: i64) -> Result<Todo, AppError> {
        self.fetch(id)
            .await?
            .ok_or_else(|| AppError::todo_not_found(id))
    }

    async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Todo, AppError> {
        let current = self.find(id).await?;
        let (title, completed) = patch.apply_to(&current);
        validate_title(&title)?;
        sqlx::query(
            "UPDATE todos SET title = ?1, completed = ?2, updated_at = ?3 WHERE id = ?4",
        )
        .bind(&title)
        .bind(completed)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        tracing::debug!(id, "updated todo");
        self.find(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        // Surface NotFound before touching anything.
        self.find(id).await?;
        sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(id, "deleted todo");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, completed, created_at, updated_at FROM todos
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }
}
