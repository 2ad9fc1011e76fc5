/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is built once at startup and cloned into every handler. It
 * holds cheap, cloneable handles only:
 * - the document store (`Arc<dyn DocumentStore>`)
 * - the real-time gateway client
 * - the credential services (session keys, password hasher)
 * - the configuration
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract a single part of
 * the state, e.g. `State(store): State<Arc<dyn DocumentStore>>`.
 */
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::{PasswordHasher, SessionKeys};
use crate::backend::realtime::CentrifugoClient;
use crate::backend::server::config::Config;
use crate::backend::store::DocumentStore;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub realtime: CentrifugoClient,
    pub sessions: SessionKeys,
    pub passwords: PasswordHasher,
    pub config: Arc<Config>,
}

impl AppState {
    /// Assemble state from configuration and an opened store
    pub fn new(
        config: Config,
        store: Arc<dyn DocumentStore>,
        realtime: CentrifugoClient,
    ) -> Self {
        Self {
            store,
            realtime,
            sessions: SessionKeys::new(&config.secret_key),
            passwords: PasswordHasher::new(config.bcrypt_cost),
            config: Arc::new(config),
        }
    }

    /// Directory uploaded files are written to
    pub fn upload_dir(&self) -> &PathBuf {
        &self.config.upload_dir
    }
}

impl FromRef<AppState> for Arc<dyn DocumentStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for CentrifugoClient {
    fn from_ref(state: &AppState) -> Self {
        state.realtime.clone()
    }
}
