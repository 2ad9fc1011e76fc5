/**
 * Stored Records
 *
 * Records held by the document store. `New*` structs carry the fields a caller
 * supplies; the store generates ids (UUID v4) on insert. Derived values such
 * as `participant_usernames` or a chat's last message are never stored here.
 */
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::{ChatType, MessageType, UserRole};

/// Registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    /// Unique
    pub username: String,
    /// Unique
    pub email: String,
    /// bcrypt hash, never serialized to clients
    pub password_hash: String,
    pub role: UserRole,
    pub profile_picture: Option<String>,
    pub is_online: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied at registration
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Conversation between participants
#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: Uuid,
    pub name: Option<String>,
    pub chat_type: ChatType,
    /// Participant user ids in insertion order, no duplicates
    pub participants: Vec<Uuid>,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_activity: Option<DateTime<Utc>>,
}

impl Chat {
    /// Whether `user_id` is a participant
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }
}

/// Fields supplied when creating a chat
#[derive(Debug, Clone)]
pub struct NewChat {
    pub name: Option<String>,
    pub chat_type: ChatType,
    pub participants: Vec<Uuid>,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Metadata of a file attached to a message
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    /// Path relative to the server's working directory, e.g. `uploads/<uuid>.png`
    pub path: String,
    /// Client-supplied file name
    pub name: String,
    /// Size in bytes
    pub size: i64,
    /// Client-declared MIME type
    pub content_type: Option<String>,
}

/// Immutable chat message
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub content: Option<String>,
    pub sender_id: Uuid,
    /// Sender's username at send time
    pub sender_username: String,
    pub message_type: MessageType,
    pub reply_to: Option<String>,
    pub file: Option<FileInfo>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when sending a message
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub chat_id: Uuid,
    pub content: Option<String>,
    pub sender_id: Uuid,
    pub sender_username: String,
    pub message_type: MessageType,
    pub reply_to: Option<String>,
    pub file: Option<FileInfo>,
    pub created_at: DateTime<Utc>,
}

/// Login audit record
///
/// Never consulted when verifying a bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// Fields supplied at login
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
