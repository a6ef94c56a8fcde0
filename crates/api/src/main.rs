//! Serves the recommendation engine over HTTP.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{create_router, AppState, Config};
use catalog::ContentStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,api=debug,recommender=debug")),
        )
        .init();

    let config = Config::from_env()?;

    info!("Loading catalog from {}", config.data_dir);
    let store = Arc::new(ContentStore::load_from_dir(Path::new(&config.data_dir))?);
    let (items, users, ratings) = store.counts();
    info!("Catalog ready: {} items, {} users, {} ratings", items, users, ratings);

    let state = AppState::new(store);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Medley API listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
