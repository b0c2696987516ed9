use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::error::AppError;

pub const BLANK_TITLE_MESSAGE: &str = "Title can't be blank";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo. `completed` defaults to false when the form
/// omits it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoDraft {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_title(&self.title)
    }
}

/// Partial update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// The title/completed pair the todo would hold after applying the patch.
    pub fn apply_to(&self, todo: &Todo) -> (String, bool) {
        let title = self.title.clone().unwrap_or_else(|| todo.title.clone());
        let completed = self.completed.unwrap_or(todo.completed);
        (title, completed)
    }
}

pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(BLANK_TITLE_MESSAGE.to_string()));
    }
    Ok(())
}
