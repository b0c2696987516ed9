use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::{AppError, Todo, TodoDraft, TodoPatch, validate_title};
use crate::storage::TodoStore;
use async_trait::async_trait;

/// In-process store with the same contract as the SQLite one. Useful for
/// tests and for running the app without a database file.
pub struct MemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
    next_id: AtomicI64,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self {
            todos: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn create(&self, draft: &TodoDraft) -> Result<Todo, AppError> {
        draft.validate()?;
        let now = Utc::now();
        let todo = Todo {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: draft.title.clone(),
            completed: draft.completed,
            created_at: now,
            updated_at: now,
        };
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn find(&self, id: i64) -> Result<Todo, AppError> {
        self.todos
            .read()
            .await
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or_else(|| AppError::todo_not_found(id))
    }

    async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Todo, AppError> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| AppError::todo_not_found(id))?;
        let (title, completed) = patch.apply_to(todo);
        validate_title(&title)?;
        todo.title = title;
        todo.completed = completed;
        todo.updated_at = Utc::now();
        Ok(todo.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| todo.id != id);
        if todos.len() == before {
            return Err(AppError::todo_not_found(id));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Todo>, AppError> {
        let mut todos = self.todos.read().await.clone();
        todos.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(todos)
    }
}
