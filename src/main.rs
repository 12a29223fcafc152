//! Minikom Server - Binary Entry Point
//!
//! Reads configuration from the environment, opens the store and serves the
//! HTTP API until Ctrl+C.

use std::sync::Arc;

use minikom::api::{create_router, AppState};
use minikom::config::Config;
use minikom::event_store::{JsonlStore, JsonlStoreConfig, MemoryStore, StateStore};
use minikom::monitor::ServiceMonitor;
use minikom::observability::init_logging;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn open_store(config: &Config) -> Result<Arc<dyn StateStore>, BoxError> {
    match &config.data_dir {
        Some(data_dir) => {
            let store_config = JsonlStoreConfig {
                sync_writes: config.sync_writes,
                ..JsonlStoreConfig::new(data_dir)
            };
            Ok(Arc::new(JsonlStore::open(store_config)?))
        }
        None => {
            tracing::warn!("MINIKOM_DATA_DIR not set, state is kept in memory only");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = Config::from_env()?;
    init_logging(config.log_format);

    tracing::info!(
        version = minikom::VERSION,
        bind = %config.bind,
        ordering = config.ordering.as_str(),
        "starting minikom"
    );

    let store = open_store(&config)?;
    let monitor = Arc::new(ServiceMonitor::with_policy(store, config.ordering));
    let app = create_router(Arc::new(AppState::new(monitor)));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
