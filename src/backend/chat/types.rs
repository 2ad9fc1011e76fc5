/**
 * Chat Handler Types
 *
 * Request bodies and response shapes of the chat, message, typing and
 * online-status endpoints. Each stored entity has exactly one response type
 * and one conversion into it.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::store::{Chat, Message};
use crate::shared::{ChatType, MessageType};

/// Default page size of a message listing
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page size a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Chat creation request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub chat_type: ChatType,
    /// User ids; the caller is added if absent
    pub participants: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Chat as returned to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub id: String,
    pub name: Option<String>,
    pub chat_type: ChatType,
    pub participants: Vec<String>,
    /// `"<id>||||<username>"` per resolvable participant
    pub participant_usernames: Vec<String>,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub last_message: Option<MessageResponse>,
}

impl ChatResponse {
    /// Response for `chat` with its derived fields filled in
    pub fn new(
        chat: &Chat,
        participant_usernames: Vec<String>,
        last_message: Option<MessageResponse>,
    ) -> Self {
        Self {
            id: chat.id.to_string(),
            name: chat.name.clone(),
            chat_type: chat.chat_type,
            participants: chat.participants.iter().map(ToString::to_string).collect(),
            participant_usernames,
            description: chat.description.clone(),
            created_by: chat.created_by.to_string(),
            created_at: chat.created_at,
            last_message,
        }
    }
}

/// Message as returned to clients and published to the gateway
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub id: String,
    pub chat_id: String,
    pub content: Option<String>,
    pub sender_id: String,
    pub sender_username: String,
    pub message_type: MessageType,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reply_to: Option<String>,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        let file = message.file.as_ref();
        Self {
            id: message.id.to_string(),
            chat_id: message.chat_id.to_string(),
            content: message.content.clone(),
            sender_id: message.sender_id.to_string(),
            sender_username: message.sender_username.clone(),
            message_type: message.message_type,
            file_path: file.map(|f| f.path.clone()),
            file_name: file.map(|f| f.name.clone()),
            file_size: file.map(|f| f.size),
            file_type: file.and_then(|f| f.content_type.clone()),
            created_at: message.created_at,
            reply_to: message.reply_to.clone(),
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}

/// JSON body accepted by `POST /messages`
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SendMessageJson {
    pub chat_id: Option<String>,
    pub content: Option<String>,
    pub message_type: Option<String>,
    pub reply_to: Option<String>,
}

/// Pagination of `GET /chats/{id}/messages`
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct MessagesQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl MessagesQuery {
    /// `(skip, limit)` after defaulting and clamping
    ///
    /// `page` defaults to 1 and is raised to 1 when smaller. `limit` defaults
    /// to 50 and is clamped to `1..=100`.
    pub fn window(&self) -> (usize, usize) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let skip = (page - 1).saturating_mul(limit);
        (skip as usize, limit as usize)
    }
}

/// Typing indicator request
///
/// `user_id` and `username` are accepted for compatibility; the published
/// event always carries the caller's identity.
#[derive(Deserialize, Serialize, Debug)]
pub struct TypingRequest {
    pub chat_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub is_typing: bool,
}

/// Online status request
///
/// Only `is_online` is used; identity comes from the bearer token and
/// last-seen is stamped by the server.
#[derive(Deserialize, Serialize, Debug)]
pub struct OnlineStatusRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub is_online: bool,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
}
