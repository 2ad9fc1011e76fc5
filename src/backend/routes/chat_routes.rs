/**
 * Chat Route Handlers
 *
 * # Routes
 *
 * - `POST /chats` - Create a chat (direct chats are reused)
 * - `GET /chats` - Chats the caller participates in
 * - `GET /chats/{chat_id}` - One chat with usernames and last message
 * - `GET /chats/{chat_id}/messages` - Paged message history
 * - `POST /messages` - Send a message (JSON, multipart or url-encoded)
 * - `POST /typing` - Typing indicator
 * - `POST /online-status` - Online status broadcast
 *
 * All chat routes require authentication.
 */
use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::backend::chat::handlers::{
    create_chat, get_chat, get_chat_messages, handle_typing_event, list_chats, send_message,
    update_online_status,
};
use crate::backend::chat::MAX_FILE_SIZE;
use crate::backend::server::state::AppState;

/// Room for multipart framing and form fields around a maximum-size file
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Configure chat-related routes
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/chats", post(create_chat).get(list_chats))
        .route("/chats/{chat_id}", get(get_chat))
        .route("/chats/{chat_id}/messages", get(get_chat_messages))
        .route(
            "/messages",
            post(send_message).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + MULTIPART_OVERHEAD)),
        )
        .route("/typing", post(handle_typing_event))
        .route("/online-status", post(update_online_status))
}
