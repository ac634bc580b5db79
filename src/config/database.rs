use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use thiserror::Error;

use super::DatabaseConfig;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to connect to the database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Create the MySQL connection pool and apply pending migrations.
pub async fn establish_connection(config: &DatabaseConfig) -> Result<MySqlPool, DatabaseError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .map_err(DatabaseError::Connect)?;
    tracing::info!(max_connections = config.max_connections, "connected to the database");

    // Run migrations automatically on startup
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied successfully");

    Ok(pool)
}
