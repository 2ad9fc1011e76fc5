/**
 * Gateway Handlers
 *
 * - `GET /centrifugo/token` - channel connection token for the caller
 * - `GET /debug/centrifugo-test` - publish a test event to `test:<user_id>`
 * - `GET /debug/centrifugo-online/{chat_id}` - gateway presence of a chat
 * - `GET /debug/centrifugo-token` - channel token together with the user id
 *
 * The debug endpoints require a bearer token like every other protected
 * route.
 */
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::realtime::centrifugo::{CentrifugoClient, CHANNEL_TOKEN_TTL_SECS};
use crate::shared::event::{chat_channel, test_channel, RealtimeEvent};

/// Channel token handler
pub async fn centrifugo_token(
    State(realtime): State<CentrifugoClient>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<Value>> {
    let token = realtime.issue_channel_token(&user.id.to_string(), CHANNEL_TOKEN_TTL_SECS)?;
    Ok(Json(json!({ "token": token })))
}

/// Publish a diagnostic event and report whether the gateway accepted it
pub async fn debug_centrifugo_test(
    State(realtime): State<CentrifugoClient>,
    AuthUser(user): AuthUser,
) -> Json<Value> {
    let channel = test_channel(user.id);
    let event = RealtimeEvent::test_message(user.id);

    let status = match realtime.publish(&channel, &event).await {
        Ok(()) => "success",
        Err(_) => "failed",
    };

    tracing::info!("[Debug] Test publish to {} {}", channel, status);

    Json(json!({
        "status": status,
        "channel": channel,
        "data": event,
        "user_id": user.id.to_string(),
    }))
}

/// Clients currently subscribed to a chat's channel
///
/// An unreachable gateway reports an empty list.
pub async fn debug_centrifugo_online(
    State(realtime): State<CentrifugoClient>,
    AuthUser(_user): AuthUser,
    Path(chat_id): Path<String>,
) -> Json<Value> {
    let online_users = realtime
        .presence(&chat_channel(&chat_id))
        .await
        .unwrap_or_default();

    Json(json!({ "chat_id": chat_id, "online_users": online_users }))
}

/// Channel token together with the id it was issued for
pub async fn debug_centrifugo_token(
    State(realtime): State<CentrifugoClient>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<Value>> {
    let user_id = user.id.to_string();
    let token = realtime.issue_channel_token(&user_id, CHANNEL_TOKEN_TTL_SECS)?;
    Ok(Json(json!({ "user_id": user_id, "token": token })))
}
