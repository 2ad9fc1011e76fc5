/**
 * API Route Handlers
 *
 * This module defines the account, user and gateway endpoints.
 *
 * # Routes
 *
 * ## Public
 * - `POST /auth/register` - User registration
 * - `POST /auth/login` - User login
 * - `GET /health` - Liveness check
 * - `GET /ws/{user_id}` - WebSocket echo
 *
 * ## Authenticated
 * - `POST /auth/logout` - Mark the caller offline
 * - `GET /users/me` - Current user
 * - `GET /users` - User search
 * - `GET /centrifugo/token` - Real-time channel token
 * - `GET /debug/centrifugo-test` - Publish a test event
 * - `GET /debug/centrifugo-online/{chat_id}` - Gateway presence
 * - `GET /debug/centrifugo-token` - Channel token with user id
 */
use axum::{response::Json, routing::get, routing::post, Router};
use serde_json::{json, Value};

use crate::backend::auth::{get_me, login, logout, register, search_users};
use crate::backend::realtime::handlers::{
    centrifugo_token, debug_centrifugo_online, debug_centrifugo_test, debug_centrifugo_token,
};
use crate::backend::server::state::AppState;
use crate::backend::socket::websocket_handler;

/// Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Configure routes reachable without a bearer token
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/health", get(health))
        .route("/ws/{user_id}", get(websocket_handler))
}

/// Configure authenticated account and gateway routes
///
/// The caller is expected to wrap the result in the auth middleware.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Account
        .route("/auth/logout", post(logout))
        .route("/users/me", get(get_me))
        .route("/users", get(search_users))
        // Real-time gateway
        .route("/centrifugo/token", get(centrifugo_token))
        .route("/debug/centrifugo-test", get(debug_centrifugo_test))
        .route(
            "/debug/centrifugo-online/{chat_id}",
            get(debug_centrifugo_online),
        )
        .route("/debug/centrifugo-token", get(debug_centrifugo_token))
}
