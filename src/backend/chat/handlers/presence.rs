/**
 * Online Status Handler
 *
 * POST /online-status stores the caller's online flag and last-seen time,
 * then announces the change to every chat the caller belongs to.
 */
use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::backend::chat::types::OnlineStatusRequest;
use crate::backend::chat::workflow;
use crate::backend::error::BackendResult;
use crate::backend::middleware::{AuthUser, JsonBody};
use crate::backend::server::state::AppState;

pub async fn update_online_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<OnlineStatusRequest>,
) -> BackendResult<Json<Value>> {
    let chats = workflow::update_online_status(
        state.store.as_ref(),
        &state.realtime,
        &user,
        request.is_online,
    )
    .await?;

    tracing::info!(
        "{} is now {} ({} chat(s) notified)",
        user.username,
        if request.is_online { "online" } else { "offline" },
        chats
    );

    Ok(Json(json!({ "status": "updated" })))
}
