use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use event_manager_api::config::{self, AppConfig, StorageBackend};
use event_manager_api::create_app;
use event_manager_api::store::SharedStore;
use event_manager_api::store::memory::MemoryStore;
use event_manager_api::store::mysql::MySqlStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

async fn build_store(config: &AppConfig) -> Result<SharedStore, BoxError> {
    let store: SharedStore = match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::MySql => {
            let db = config
                .database
                .as_ref()
                .ok_or(config::ConfigError::Missing("DATABASE_URL"))?;
            // Establish database connection (and run migrations)
            let pool = config::database::establish_connection(db).await?;
            Arc::new(MySqlStore::new(pool))
        }
    };
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables from .env file (if present)
    dotenv().ok();

    // Initialize tracing for structured logs
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr()?;
    let store = build_store(&config).await?;

    let app = create_app(store, &config.cors);

    tracing::info!("Listening on http://{}", addr);

    // Start the server and handle shutdown via ctrl-c
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app.into_make_service());

    let shutdown_signal = async {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
    };

    tokio::select! {
        res = server => {
            res.map_err(|e| BoxError::from(format!("Failed to serve application: {e}")))?;
        }
        _ = shutdown_signal => {
            tracing::info!("Shutdown requested; exiting");
        }
    };

    Ok(())
}
