/**
 * In-Memory Document Store
 *
 * Keeps every collection in a `Vec` behind one `RwLock`. Used when the server
 * starts without `DATABASE_URL` and by the tests. Records live only as long as
 * the process.
 */
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Chat, Message, NewChat, NewMessage, NewSession, NewUser, Session, User};
use super::{DocumentStore, StoreError, StoreResult};
use crate::shared::ChatType;

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    chats: Vec<Chat>,
    /// Kept in insertion order, which breaks `created_at` ties
    messages: Vec<Message>,
    sessions: Vec<Session>,
}

/// Cloneable in-process store; clones share the same collections
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sessions of a user, oldest first
    pub async fn sessions_for(&self, user_id: Uuid) -> Vec<Session> {
        let inner = self.inner.read().await;
        inner
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Messages of a chat sorted by creation time, ties in insertion order
    fn chat_messages(inner: &Collections, chat_id: Uuid) -> Vec<Message> {
        let mut messages: Vec<Message> = inner
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        messages
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict {
                field: "email".to_string(),
            });
        }
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict {
                field: "username".to_string(),
            });
        }

        let record = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            profile_picture: user.profile_picture,
            is_online: false,
            last_seen: None,
            created_at: user.created_at,
        };
        inner.users.push(record.clone());
        Ok(record)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }

    async fn search_users(&self, search: Option<&str>, limit: usize) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        let needle = search.filter(|s| !s.is_empty()).map(str::to_lowercase);

        Ok(inner
            .users
            .iter()
            .filter(|u| match &needle {
                Some(needle) => {
                    u.username.to_lowercase().contains(needle.as_str())
                        || u.email.to_lowercase().contains(needle.as_str())
                }
                None => true,
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn set_user_presence(
        &self,
        id: Uuid,
        is_online: bool,
        last_seen: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == id) {
            user.is_online = is_online;
            user.last_seen = Some(last_seen);
        }
        Ok(())
    }

    async fn insert_session(&self, session: NewSession) -> StoreResult<Session> {
        let mut inner = self.inner.write().await;
        let record = Session {
            id: Uuid::new_v4(),
            user_id: session.user_id,
            issued_at: session.issued_at,
            expires_at: session.expires_at,
            ended_at: None,
        };
        inner.sessions.push(record.clone());
        Ok(record)
    }

    async fn end_sessions(&self, user_id: Uuid, ended_at: DateTime<Utc>) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let mut ended = 0;
        for session in inner
            .sessions
            .iter_mut()
            .filter(|s| s.user_id == user_id && s.ended_at.is_none())
        {
            session.ended_at = Some(ended_at);
            ended += 1;
        }
        Ok(ended)
    }

    async fn insert_chat(&self, chat: NewChat) -> StoreResult<Chat> {
        let mut inner = self.inner.write().await;
        let record = Chat {
            id: Uuid::new_v4(),
            name: chat.name,
            chat_type: chat.chat_type,
            participants: chat.participants,
            description: chat.description,
            created_by: chat.created_by,
            created_at: chat.created_at,
            last_activity: None,
        };
        inner.chats.push(record.clone());
        Ok(record)
    }

    async fn find_chat_for_participant(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Chat>> {
        let inner = self.inner.read().await;
        Ok(inner
            .chats
            .iter()
            .find(|c| c.id == chat_id && c.has_participant(user_id))
            .cloned())
    }

    async fn find_direct_chat_containing(&self, participants: &[Uuid]) -> StoreResult<Option<Chat>> {
        if participants.is_empty() {
            return Ok(None);
        }
        let inner = self.inner.read().await;
        Ok(inner
            .chats
            .iter()
            .find(|c| {
                c.chat_type == ChatType::Direct
                    && participants.iter().all(|p| c.has_participant(*p))
            })
            .cloned())
    }

    async fn list_chats_for_participant(&self, user_id: Uuid, limit: usize) -> StoreResult<Vec<Chat>> {
        let inner = self.inner.read().await;
        let mut chats: Vec<Chat> = inner
            .chats
            .iter()
            .filter(|c| c.has_participant(user_id))
            .cloned()
            .collect();
        // Newest first; later insertions win ties
        chats.reverse();
        chats.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        chats.truncate(limit);
        Ok(chats)
    }

    async fn touch_chat_activity(&self, chat_id: Uuid, at: DateTime<Utc>) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(chat) = inner.chats.iter_mut().find(|c| c.id == chat_id) {
            chat.last_activity = Some(at);
        }
        Ok(())
    }

    async fn insert_message(&self, message: NewMessage) -> StoreResult<Message> {
        let mut inner = self.inner.write().await;
        let record = Message {
            id: Uuid::new_v4(),
            chat_id: message.chat_id,
            content: message.content,
            sender_id: message.sender_id,
            sender_username: message.sender_username,
            message_type: message.message_type,
            reply_to: message.reply_to,
            file: message.file,
            created_at: message.created_at,
        };
        inner.messages.push(record.clone());
        Ok(record)
    }

    async fn latest_message(&self, chat_id: Uuid) -> StoreResult<Option<Message>> {
        let inner = self.inner.read().await;
        Ok(Self::chat_messages(&inner, chat_id).pop())
    }

    async fn list_messages(&self, chat_id: Uuid, skip: usize, limit: usize) -> StoreResult<Vec<Message>> {
        let inner = self.inner.read().await;
        let mut page: Vec<Message> = Self::chat_messages(&inner, chat_id)
            .into_iter()
            .rev()
            .skip(skip)
            .take(limit)
            .collect();
        page.reverse();
        Ok(page)
    }
}
