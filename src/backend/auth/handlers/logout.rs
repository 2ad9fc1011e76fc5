/**
 * Logout Handler
 *
 * POST /auth/logout marks the caller offline and closes their session audit
 * records. The bearer token itself stays valid until it expires.
 */
use axum::{extract::State, response::Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<Value>> {
    let now = Utc::now();

    state.store.set_user_presence(user.id, false, now).await?;
    let ended = state.store.end_sessions(user.id, now).await?;

    tracing::info!("User logged out: {} ({} session(s) closed)", user.username, ended);

    Ok(Json(json!({ "message": "Logged out successfully" })))
}
