/**
 * Real-time Event Payloads
 *
 * This module defines the events published to the real-time gateway. Every
 * event is a JSON object whose `type` field names the event, so frontends can
 * dispatch on a single key:
 *
 * - `new_message` - a message was persisted in a chat
 * - `typing_indicator` - a participant started or stopped typing
 * - `online_status` - a participant went online or offline
 * - `test_message` - diagnostic publish from the debug endpoint
 *
 * Chats map 1:1 onto gateway channels named `chat-<chat_id>`.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Event published to a real-time gateway channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealtimeEvent {
    /// A message was stored in a chat
    NewMessage {
        /// Fully serialized message, identical to the HTTP response body
        message: serde_json::Value,
        chat_id: String,
        sender_id: String,
        /// When the event was published (not when the message was created)
        timestamp: DateTime<Utc>,
    },
    /// A participant's typing state changed
    TypingIndicator {
        user_id: String,
        username: String,
        is_typing: bool,
    },
    /// A participant's online flag changed
    OnlineStatus {
        user_id: String,
        username: String,
        is_online: bool,
    },
    /// Diagnostic event used to check gateway connectivity
    TestMessage {
        message: String,
        timestamp: DateTime<Utc>,
        user_id: String,
    },
}

impl RealtimeEvent {
    /// Create a `new_message` event stamped with the current time
    pub fn new_message(
        message: serde_json::Value,
        chat_id: impl Display,
        sender_id: impl Display,
    ) -> Self {
        Self::NewMessage {
            message,
            chat_id: chat_id.to_string(),
            sender_id: sender_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Create a `typing_indicator` event
    pub fn typing(user_id: impl Display, username: impl Into<String>, is_typing: bool) -> Self {
        Self::TypingIndicator {
            user_id: user_id.to_string(),
            username: username.into(),
            is_typing,
        }
    }

    /// Create an `online_status` event
    pub fn online_status(user_id: impl Display, username: impl Into<String>, is_online: bool) -> Self {
        Self::OnlineStatus {
            user_id: user_id.to_string(),
            username: username.into(),
            is_online,
        }
    }

    /// Create a `test_message` event
    pub fn test_message(user_id: impl Display) -> Self {
        Self::TestMessage {
            message: "This is a test message".to_string(),
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
        }
    }

    /// Name carried in the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewMessage { .. } => "new_message",
            Self::TypingIndicator { .. } => "typing_indicator",
            Self::OnlineStatus { .. } => "online_status",
            Self::TestMessage { .. } => "test_message",
        }
    }
}

/// Gateway channel carrying the events of one chat
pub fn chat_channel(chat_id: impl Display) -> String {
    format!("chat-{}", chat_id)
}

/// Per-user diagnostic channel
pub fn test_channel(user_id: impl Display) -> String {
    format!("test:{}", user_id)
}
