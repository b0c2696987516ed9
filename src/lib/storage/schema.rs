use sqlx::migrate::MigrateDatabase;
use sqlx::{Pool, Sqlite, SqlitePool};

/// On-disk shape of the todos table. Timestamps are stored as RFC 3339 text,
/// which sqlx maps to `chrono::DateTime<Utc>`.
pub const CREATE_TODOS_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

pub async fn connect_to_database(url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !Sqlite::database_exists(url).await.unwrap_or(false) {
        tracing::info!(url, "creating database");
        Sqlite::create_database(url).await?;
    }
    let pool = SqlitePool::connect(url).await?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TODOS_TABLE).execute(pool).await?;
    Ok(())
}
