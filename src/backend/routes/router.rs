/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layout
 *
 * 1. Public routes (register, login, health, WebSocket echo)
 * 2. Authenticated routes behind `auth_middleware`
 * 3. `/uploads` static file serving
 * 4. CORS and request tracing layers
 */
use axum::{
    http::{header, HeaderValue},
    middleware, Router,
};
use tower_http::{
    cors::{AllowMethods, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::{configure_api_routes, configure_public_routes};
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state shared by every handler
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = configure_chat_routes(configure_api_routes(Router::new())).route_layer(
        middleware::from_fn_with_state(app_state.clone(), auth_middleware),
    );

    let router = configure_public_routes(Router::new())
        .merge(protected)
        .nest_service("/uploads", ServeDir::new(app_state.upload_dir()))
        .layer(cors_layer(&app_state.config.cors_origins))
        .layer(TraceLayer::new_for_http());

    router.with_state(app_state)
}

/// CORS policy for the configured origins
///
/// Any method, `Content-Type` and `Authorization` headers, no credentials.
/// A `*` entry allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::any())
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("[Server] Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
