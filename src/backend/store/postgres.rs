/**
 * PostgreSQL Document Store
 *
 * sqlx-backed implementation of [`DocumentStore`]. Enumerations are stored as
 * lowercase text and parsed back through `FromStr`; a value that no longer
 * parses is reported as [`StoreError::Corrupt`].
 *
 * Participants live in a `UUID[]` column with a GIN index, so "chats of a
 * user" is `participants @> ARRAY[$1]` and the direct-chat lookup is a
 * superset match on the same operator.
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Chat, FileInfo, Message, NewChat, NewMessage, NewSession, NewUser, Session, User};
use super::{DocumentStore, StoreError, StoreResult};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, profile_picture, is_online, last_seen, created_at";

const CHAT_COLUMNS: &str =
    "id, name, chat_type, participants, description, created_by, created_at, last_activity";

const MESSAGE_COLUMNS: &str = "id, chat_id, content, sender_id, sender_username, message_type, \
     reply_to, file_path, file_name, file_size, file_type, created_at";

/// Store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    profile_picture: Option<String>,
    is_online: bool,
    last_seen: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role.parse().map_err(corrupt)?,
            profile_picture: row.profile_picture,
            is_online: row.is_online,
            last_seen: row.last_seen,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ChatRow {
    id: Uuid,
    name: Option<String>,
    chat_type: String,
    participants: Vec<Uuid>,
    description: Option<String>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    last_activity: Option<DateTime<Utc>>,
}

impl TryFrom<ChatRow> for Chat {
    type Error = StoreError;

    fn try_from(row: ChatRow) -> Result<Self, Self::Error> {
        Ok(Chat {
            id: row.id,
            name: row.name,
            chat_type: row.chat_type.parse().map_err(corrupt)?,
            participants: row.participants,
            description: row.description,
            created_by: row.created_by,
            created_at: row.created_at,
            last_activity: row.last_activity,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    chat_id: Uuid,
    content: Option<String>,
    sender_id: Uuid,
    sender_username: String,
    message_type: String,
    reply_to: Option<String>,
    file_path: Option<String>,
    file_name: Option<String>,
    file_size: Option<i64>,
    file_type: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = StoreError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let file = match (row.file_path, row.file_name, row.file_size) {
            (Some(path), Some(name), Some(size)) => Some(FileInfo {
                path,
                name,
                size,
                content_type: row.file_type,
            }),
            _ => None,
        };

        Ok(Message {
            id: row.id,
            chat_id: row.chat_id,
            content: row.content,
            sender_id: row.sender_id,
            sender_username: row.sender_username,
            message_type: row.message_type.parse().map_err(corrupt)?,
            reply_to: row.reply_to,
            file,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            user_id: row.user_id,
            issued_at: row.issued_at,
            expires_at: row.expires_at,
            ended_at: row.ended_at,
        }
    }
}

fn corrupt(err: impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(err.to_string())
}

/// Map a sqlx error, recognising unique violations on the users table
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let field = match db.constraint() {
                Some(c) if c.contains("email") => "email",
                Some(c) if c.contains("username") => "username",
                _ => "value",
            };
            return StoreError::Conflict {
                field: field.to_string(),
            };
        }
    }
    StoreError::Database(err.to_string())
}

/// Escape LIKE wildcards so the search text matches literally
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for ch in search.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, username, email, password_hash, role, profile_picture, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.profile_picture)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.try_into()
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_user_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 OR username = $2 LIMIT 1"
        ))
        .bind(email)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn search_users(&self, search: Option<&str>, limit: usize) -> StoreResult<Vec<User>> {
        let pattern = search.filter(|s| !s.is_empty()).map(like_pattern);

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE $1::TEXT IS NULL OR username ILIKE $1 OR email ILIKE $1
            ORDER BY created_at ASC
            LIMIT $2
            "#
        ))
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn set_user_presence(
        &self,
        id: Uuid,
        is_online: bool,
        last_seen: DateTime<Utc>,
    ) -> StoreResult<()> {
        sqlx::query("UPDATE users SET is_online = $2, last_seen = $3 WHERE id = $1")
            .bind(id)
            .bind(is_online)
            .bind(last_seen)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn insert_session(&self, session: NewSession) -> StoreResult<Session> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO user_sessions (id, user_id, issued_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, issued_at, expires_at, ended_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session.user_id)
        .bind(session.issued_at)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn end_sessions(&self, user_id: Uuid, ended_at: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE user_sessions SET ended_at = $2 WHERE user_id = $1 AND ended_at IS NULL",
        )
        .bind(user_id)
        .bind(ended_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn insert_chat(&self, chat: NewChat) -> StoreResult<Chat> {
        let row = sqlx::query_as::<_, ChatRow>(&format!(
            r#"
            INSERT INTO chats (id, name, chat_type, participants, description, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CHAT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&chat.name)
        .bind(chat.chat_type.as_str())
        .bind(&chat.participants)
        .bind(&chat.description)
        .bind(chat.created_by)
        .bind(chat.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.try_into()
    }

    async fn find_chat_for_participant(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Chat>> {
        sqlx::query_as::<_, ChatRow>(&format!(
            "SELECT {CHAT_COLUMNS} FROM chats WHERE id = $1 AND participants @> ARRAY[$2]::UUID[]"
        ))
        .bind(chat_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .map(Chat::try_from)
        .transpose()
    }

    async fn find_direct_chat_containing(&self, participants: &[Uuid]) -> StoreResult<Option<Chat>> {
        if participants.is_empty() {
            return Ok(None);
        }

        sqlx::query_as::<_, ChatRow>(&format!(
            r#"
            SELECT {CHAT_COLUMNS}
            FROM chats
            WHERE chat_type = 'direct' AND participants @> $1
            ORDER BY created_at ASC
            LIMIT 1
            "#
        ))
        .bind(participants)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .map(Chat::try_from)
        .transpose()
    }

    async fn list_chats_for_participant(&self, user_id: Uuid, limit: usize) -> StoreResult<Vec<Chat>> {
        let rows = sqlx::query_as::<_, ChatRow>(&format!(
            r#"
            SELECT {CHAT_COLUMNS}
            FROM chats
            WHERE participants @> ARRAY[$1]::UUID[]
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(Chat::try_from).collect()
    }

    async fn touch_chat_activity(&self, chat_id: Uuid, at: DateTime<Utc>) -> StoreResult<()> {
        sqlx::query("UPDATE chats SET last_activity = $2 WHERE id = $1")
            .bind(chat_id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn insert_message(&self, message: NewMessage) -> StoreResult<Message> {
        let file = message.file.as_ref();

        let row = sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            INSERT INTO messages (
                id, chat_id, content, sender_id, sender_username, message_type,
                reply_to, file_path, file_name, file_size, file_type, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(message.chat_id)
        .bind(&message.content)
        .bind(message.sender_id)
        .bind(&message.sender_username)
        .bind(message.message_type.as_str())
        .bind(&message.reply_to)
        .bind(file.map(|f| f.path.clone()))
        .bind(file.map(|f| f.name.clone()))
        .bind(file.map(|f| f.size))
        .bind(file.and_then(|f| f.content_type.clone()))
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.try_into()
    }

    async fn latest_message(&self, chat_id: Uuid) -> StoreResult<Option<Message>> {
        sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at DESC, seq DESC
            LIMIT 1
            "#
        ))
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .map(Message::try_from)
        .transpose()
    }

    async fn list_messages(&self, chat_id: Uuid, skip: usize, limit: usize) -> StoreResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at DESC, seq DESC
            OFFSET $2
            LIMIT $3
            "#
        ))
        .bind(chat_id)
        .bind(skip as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut messages = rows
            .into_iter()
            .map(Message::try_from)
            .collect::<StoreResult<Vec<_>>>()?;
        messages.reverse();
        Ok(messages)
    }
}
