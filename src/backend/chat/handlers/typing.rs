/**
 * Typing Indicator Handler
 *
 * This module implements the typing indicator handler for POST /typing.
 *
 * # Event Flow
 *
 * 1. Client sends its typing state for a chat
 * 2. Server publishes a `typing_indicator` event to `chat-<chat_id>` with the
 *    caller's id and username
 * 3. Chat members subscribed to the channel update their UI
 *
 * Delivery is advisory: the handler answers `{"status": "sent"}` whether or
 * not the gateway accepted the event.
 */
use axum::{body::Bytes, extract::State, response::Json};
use serde_json::{json, Value};

use crate::backend::chat::types::TypingRequest;
use crate::backend::chat::workflow;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::realtime::CentrifugoClient;

/// Handle typing indicator event (POST /typing)
///
/// # Request Body
///
/// ```json
/// {"chat_id": "…", "user_id": "…", "username": "alice", "is_typing": true}
/// ```
///
/// # Errors
///
/// * `400 Bad Request` - If the request body cannot be parsed
pub async fn handle_typing_event(
    State(realtime): State<CentrifugoClient>,
    AuthUser(user): AuthUser,
    body: Bytes,
) -> BackendResult<Json<Value>> {
    let request: TypingRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Failed to parse typing event: {:?}", e);
        BackendError::validation(format!("Invalid typing event: {}", e))
    })?;

    if request.chat_id.trim().is_empty() {
        return Err(BackendError::validation("Chat ID is required."));
    }

    tracing::debug!(
        "{} is_typing={} in chat {}",
        user.username,
        request.is_typing,
        request.chat_id
    );

    workflow::publish_typing(&realtime, &user, request.chat_id.trim(), request.is_typing).await;

    Ok(Json(json!({ "status": "sent" })))
}
