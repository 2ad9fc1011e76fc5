/**
 * Server Configuration
 *
 * This module handles loading of server configuration from environment
 * variables and the optional PostgreSQL database connection.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (after `.env` has been
 * read by `main`), with defaults suitable for local development.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup. An
 * unparseable value keeps its default; a missing or unreachable database
 * leaves the server on the in-memory store.
 */
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::auth::passwords::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::backend::store::{DocumentStore, MemoryStore, PgStore};

/// Placeholder API key shipped in sample configuration
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Placeholder token secret shipped in sample configuration
pub const PLACEHOLDER_SECRET: &str = "your-secret-here";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Env: `SERVER_HOST`, default `0.0.0.0`
    pub host: String,
    /// Env: `SERVER_PORT`, default `8000`
    pub port: u16,
    /// Env: `DATABASE_URL`; unset means in-memory storage
    pub database_url: Option<String>,
    /// Session token signing secret. Env: `SECRET_KEY`
    pub secret_key: String,
    /// Env: `CENTRIFUGO_API_URL`, default `http://localhost:9001`
    pub centrifugo_api_url: String,
    /// Env: `CENTRIFUGO_API_KEY`
    pub centrifugo_api_key: String,
    /// Channel token signing secret. Env: `CENTRIFUGO_SECRET`
    pub centrifugo_secret: String,
    /// Env: `UPLOAD_DIR`, default `uploads`
    pub upload_dir: PathBuf,
    /// Comma-separated. Env: `CORS_ORIGINS`, default `http://localhost:3000`
    pub cors_origins: Vec<String>,
    /// Env: `BCRYPT_COST`, default `bcrypt::DEFAULT_COST`
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: None,
            secret_key: "your-secret-key-here".to_string(),
            centrifugo_api_url: "http://localhost:9001".to_string(),
            centrifugo_api_key: PLACEHOLDER_API_KEY.to_string(),
            centrifugo_secret: PLACEHOLDER_SECRET.to_string(),
            upload_dir: PathBuf::from("uploads"),
            cors_origins: vec!["http://localhost:3000".to_string()],
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("SERVER_HOST") {
            config.host = host;
        }

        if let Some(port) = get("SERVER_PORT") {
            match port.parse::<u16>() {
                Ok(parsed) => config.port = parsed,
                Err(_) => tracing::warn!("Invalid SERVER_PORT '{}', using default {}", port, config.port),
            }
        }

        config.database_url = get("DATABASE_URL");

        if let Some(secret) = get("SECRET_KEY") {
            config.secret_key = secret;
        }

        if let Some(url) = get("CENTRIFUGO_API_URL") {
            config.centrifugo_api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(key) = get("CENTRIFUGO_API_KEY") {
            config.centrifugo_api_key = key;
        }

        if let Some(secret) = get("CENTRIFUGO_SECRET") {
            config.centrifugo_secret = secret;
        }

        if let Some(dir) = get("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }

        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(cost) = get("BCRYPT_COST") {
            match cost.parse::<u32>() {
                Ok(parsed) if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&parsed) => {
                    config.bcrypt_cost = parsed
                }
                _ => tracing::warn!(
                    "Invalid BCRYPT_COST '{}', using default {}",
                    cost,
                    config.bcrypt_cost
                ),
            }
        }

        config
    }

    /// Address the HTTP listener binds to
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// Open the configured document store
///
/// This function:
/// 1. Reads `database_url` from the configuration
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `PgStore` if the database is reachable
/// - `MemoryStore` if no URL is configured or the connection fails
pub async fn load_store(config: &Config) -> Arc<dyn DocumentStore> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set. Using in-memory store; data will not persist.");
        return Arc::new(MemoryStore::new());
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory store; data will not persist.");
            return Arc::new(MemoryStore::new());
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Arc::new(PgStore::new(pool))
}
