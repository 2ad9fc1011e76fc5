/**
 * Chat Handlers
 *
 * - `POST /chats` - create a chat (or reuse the direct chat for a pair)
 * - `GET /chats` - the caller's chats, newest first
 * - `GET /chats/{id}` - one chat the caller participates in
 * - `GET /chats/{id}/messages` - a chronological page of its messages
 */
use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::chat::types::{ChatResponse, CreateChatRequest, MessageResponse, MessagesQuery};
use crate::backend::chat::workflow;
use crate::backend::error::BackendResult;
use crate::backend::middleware::{AuthUser, JsonBody, QueryParams};
use crate::backend::server::state::AppState;

/// Create chat handler
///
/// # Errors
///
/// * `400 Bad Request` - A participant id is not a valid id
pub async fn create_chat(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<CreateChatRequest>,
) -> BackendResult<Json<ChatResponse>> {
    let chat = workflow::create_or_get_chat(state.store.as_ref(), &user, request).await?;
    Ok(Json(chat))
}

/// List chats handler
pub async fn list_chats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<Vec<ChatResponse>>> {
    let chats = workflow::list_chats(state.store.as_ref(), &user).await?;
    tracing::debug!("Listing {} chat(s) for {}", chats.len(), user.username);
    Ok(Json(chats))
}

/// Get chat handler
///
/// # Errors
///
/// * `404 Not Found` - Chat missing or caller not a participant
pub async fn get_chat(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(chat_id): Path<String>,
) -> BackendResult<Json<ChatResponse>> {
    let store = state.store.as_ref();
    let chat = workflow::find_visible_chat(store, &chat_id, user.id, "Chat not found").await?;
    Ok(Json(workflow::describe_chat(store, &chat).await?))
}

/// Get chat messages handler
///
/// # Errors
///
/// * `404 Not Found` - Chat missing or caller not a participant
pub async fn get_chat_messages(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(chat_id): Path<String>,
    QueryParams(query): QueryParams<MessagesQuery>,
) -> BackendResult<Json<Vec<MessageResponse>>> {
    let messages = workflow::list_messages(state.store.as_ref(), &chat_id, &user, query).await?;
    Ok(Json(messages))
}
