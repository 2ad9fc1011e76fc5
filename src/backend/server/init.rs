/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store loading, gateway client creation, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load configuration from the environment
 * 2. Create the upload directory
 * 3. Open the document store (PostgreSQL, or in-memory without `DATABASE_URL`)
 * 4. Build the gateway client
 * 5. Create and configure the router
 */
use std::sync::Arc;

use axum::Router;

use crate::backend::realtime::CentrifugoClient;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, Config};
use crate::backend::server::state::AppState;
use crate::backend::store::DocumentStore;

/// Error type for startup failures
pub type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Create and configure the Axum application from the environment
///
/// # Error Handling
///
/// - Missing or unreachable database: the in-memory store is used
/// - Migration failures: logged but don't prevent startup
/// - Unwritable upload directory: startup fails
pub async fn create_app() -> Result<Router<()>, InitError> {
    let config = Config::from_env();
    tracing::info!("[Server] Initializing dtalks backend server");

    let store = load_store(&config).await;
    build_app(config, store).await
}

/// Build the application around an already opened store
pub async fn build_app(config: Config, store: Arc<dyn DocumentStore>) -> Result<Router<()>, InitError> {
    tokio::fs::create_dir_all(&config.upload_dir).await.map_err(|e| {
        tracing::error!(
            "[Server] Cannot create upload directory {}: {}",
            config.upload_dir.display(),
            e
        );
        e
    })?;

    let realtime = CentrifugoClient::new(
        &config.centrifugo_api_url,
        &config.centrifugo_api_key,
        &config.centrifugo_secret,
    )?;
    tracing::info!("[Server] Real-time gateway at {}", realtime.api_url());

    let app_state = AppState::new(config, store, realtime);
    Ok(create_router(app_state))
}
