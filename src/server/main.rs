use prk_todos::adapters::http::{HttpServer, HttpServerConfig};
use prk_todos::storage::schema::connect_to_database;
use prk_todos::storage::sqlite::SqliteTodoStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:todos.db".to_string());
    let pool = connect_to_database(&database_url).await?;
    let store = Arc::new(SqliteTodoStore::new(pool));

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let config = HttpServerConfig { port: &port };

    let server = HttpServer::new(store, config).await?;
    server.run().await
}
