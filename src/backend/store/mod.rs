//! Document Store
//!
//! Typed access to the `users`, `chats`, `messages` and `sessions`
//! collections behind the [`DocumentStore`] trait.
//!
//! # Implementations
//!
//! - [`PgStore`] - PostgreSQL via sqlx, schema from `migrations/`
//! - [`MemoryStore`] - in-process collections, used when no database is
//!   configured and by the test-suite
//!
//! Both enforce unique `users.email` and `users.username`, surfacing a
//! violation as [`StoreError::Conflict`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod models;
pub mod postgres;

pub use memory::MemoryStore;
pub use models::{Chat, FileInfo, Message, NewChat, NewMessage, NewSession, NewUser, Session, User};
pub use postgres::PgStore;

/// Maximum number of users returned by a search
pub const USER_SEARCH_LIMIT: usize = 100;

/// Maximum number of chats returned by a listing
pub const CHAT_LIST_LIMIT: usize = 100;

/// Errors raised by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write
    #[error("A record with this {field} already exists")]
    Conflict {
        /// The unique field that collided
        field: String,
    },

    /// The backing database failed
    #[error("Database error: {0}")]
    Database(String),

    /// A stored value could not be decoded into its domain type
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations used by the chat backend
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a user, generating its id
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Find a user holding either the email or the username
    async fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> StoreResult<Option<User>>;

    /// Case-insensitive substring search on username or email
    ///
    /// `search` is matched literally. `None` lists all users. At most `limit`
    /// users are returned.
    async fn search_users(&self, search: Option<&str>, limit: usize) -> StoreResult<Vec<User>>;

    /// Set the online flag and last-seen timestamp
    async fn set_user_presence(
        &self,
        id: Uuid,
        is_online: bool,
        last_seen: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Append a login audit record
    async fn insert_session(&self, session: NewSession) -> StoreResult<Session>;

    /// Stamp `ended_at` on every open session of a user, returning how many
    async fn end_sessions(&self, user_id: Uuid, ended_at: DateTime<Utc>) -> StoreResult<u64>;

    /// Insert a chat, generating its id
    async fn insert_chat(&self, chat: NewChat) -> StoreResult<Chat>;

    /// Find a chat only if `user_id` participates in it
    async fn find_chat_for_participant(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Chat>>;

    /// Find a direct chat whose participants include all of `participants`
    ///
    /// Returns `None` for an empty slice.
    async fn find_direct_chat_containing(&self, participants: &[Uuid]) -> StoreResult<Option<Chat>>;

    /// Chats `user_id` participates in, newest created first
    async fn list_chats_for_participant(&self, user_id: Uuid, limit: usize) -> StoreResult<Vec<Chat>>;

    /// Set a chat's `last_activity`
    async fn touch_chat_activity(&self, chat_id: Uuid, at: DateTime<Utc>) -> StoreResult<()>;

    /// Insert a message, generating its id
    async fn insert_message(&self, message: NewMessage) -> StoreResult<Message>;

    /// Most recent message of a chat by creation time
    async fn latest_message(&self, chat_id: Uuid) -> StoreResult<Option<Message>>;

    /// A page of a chat's messages
    ///
    /// The window is taken newest-first (skip `skip`, take `limit`) and
    /// returned in chronological order.
    async fn list_messages(&self, chat_id: Uuid, skip: usize, limit: usize) -> StoreResult<Vec<Message>>;
}
