//! Chat Workflow
//!
//! The operations behind the chat endpoints: creating (or reusing) chats,
//! enriching them with participant names, and sending messages.
//!
//! # Message Send
//!
//! 1. Require a chat id
//! 2. Require the chat to exist and include the sender (one shared 404
//!    for both cases)
//! 3. For `file` messages with an attachment: enforce the size ceiling and
//!    store the file
//! 4. Persist the message
//! 5. Publish a `new_message` event to `chat-<chat_id>`
//! 6. Stamp the chat's `last_activity`
//! 7. Return the persisted message
//!
//! Step 5 is advisory: a failed publish is logged and the response is the
//! same as if it had succeeded.

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::chat::types::{ChatResponse, CreateChatRequest, MessageResponse, MessagesQuery};
use crate::backend::chat::uploads::{self, UploadedFile};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::realtime::CentrifugoClient;
use crate::backend::store::{Chat, DocumentStore, NewChat, NewMessage, StoreResult, User, CHAT_LIST_LIMIT};
use crate::shared::{chat_channel, ChatType, MessageType, RealtimeEvent};

/// Separator between id and username in `participant_usernames`
pub const PARTICIPANT_SEPARATOR: &str = "||||";

/// Detail of the 404 returned for missing and foreign chats alike
pub const CHAT_ACCESS_DENIED: &str = "Chat not found or access denied";

/// A message as received from any transport, before validation
#[derive(Debug, Default)]
pub struct MessageDraft {
    pub chat_id: Option<String>,
    pub content: Option<String>,
    pub message_type: Option<String>,
    pub reply_to: Option<String>,
    pub file: Option<UploadedFile>,
}

/// `"<id>||||<username>"` for every participant that resolves to a user
///
/// Unknown ids are skipped.
pub async fn participant_usernames(
    store: &dyn DocumentStore,
    participants: &[Uuid],
) -> StoreResult<Vec<String>> {
    let mut names = Vec::with_capacity(participants.len());
    for id in participants {
        if let Some(user) = store.find_user_by_id(*id).await? {
            names.push(format!("{}{}{}", id, PARTICIPANT_SEPARATOR, user.username));
        }
    }
    Ok(names)
}

/// Build the response for `chat`, including its derived fields
pub async fn describe_chat(store: &dyn DocumentStore, chat: &Chat) -> StoreResult<ChatResponse> {
    let usernames = participant_usernames(store, &chat.participants).await?;
    let last_message = store
        .latest_message(chat.id)
        .await?
        .map(MessageResponse::from);
    Ok(ChatResponse::new(chat, usernames, last_message))
}

/// Parse participant ids and drop repeats, keeping first occurrences
fn parse_participants(raw: &[String]) -> BackendResult<Vec<Uuid>> {
    let mut participants = Vec::with_capacity(raw.len() + 1);
    for id in raw {
        let parsed = Uuid::parse_str(id.trim())
            .map_err(|_| BackendError::validation(format!("Invalid participant id: {}", id)))?;
        if !participants.contains(&parsed) {
            participants.push(parsed);
        }
    }
    Ok(participants)
}

/// Create a chat, or return the existing direct chat for these participants
///
/// A direct chat is reused when its participants include every requested
/// participant. There is no lock around the lookup, so two concurrent
/// requests can still create two chats.
pub async fn create_or_get_chat(
    store: &dyn DocumentStore,
    creator: &User,
    request: CreateChatRequest,
) -> BackendResult<ChatResponse> {
    let mut participants = parse_participants(&request.participants)?;

    if request.chat_type == ChatType::Direct {
        if let Some(existing) = store.find_direct_chat_containing(&participants).await? {
            tracing::debug!("Reusing direct chat {} for {}", existing.id, creator.username);
            return Ok(describe_chat(store, &existing).await?);
        }
    }

    if !participants.contains(&creator.id) {
        participants.push(creator.id);
    }

    let chat = store
        .insert_chat(NewChat {
            name: request.name,
            chat_type: request.chat_type,
            participants,
            description: request.description,
            created_by: creator.id,
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!(
        "Created {} chat {} with {} participant(s)",
        chat.chat_type,
        chat.id,
        chat.participants.len()
    );

    Ok(describe_chat(store, &chat).await?)
}

/// Load a chat the user participates in
///
/// A malformed id, a missing chat and a foreign chat all yield the same
/// `NotFound` with `detail`.
pub async fn find_visible_chat(
    store: &dyn DocumentStore,
    chat_id: &str,
    user_id: Uuid,
    detail: &str,
) -> BackendResult<Chat> {
    let Ok(id) = Uuid::parse_str(chat_id.trim()) else {
        return Err(BackendError::not_found(detail));
    };

    store
        .find_chat_for_participant(id, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(detail))
}

/// Chats of `user`, newest first, each with derived fields
pub async fn list_chats(store: &dyn DocumentStore, user: &User) -> BackendResult<Vec<ChatResponse>> {
    let chats = store.list_chats_for_participant(user.id, CHAT_LIST_LIMIT).await?;

    let mut responses = Vec::with_capacity(chats.len());
    for chat in &chats {
        responses.push(describe_chat(store, chat).await?);
    }
    Ok(responses)
}

/// A chronological page of a chat's messages
pub async fn list_messages(
    store: &dyn DocumentStore,
    chat_id: &str,
    user: &User,
    query: MessagesQuery,
) -> BackendResult<Vec<MessageResponse>> {
    let chat = find_visible_chat(store, chat_id, user.id, CHAT_ACCESS_DENIED).await?;
    let (skip, limit) = query.window();

    let messages = store.list_messages(chat.id, skip, limit).await?;
    Ok(messages.iter().map(MessageResponse::from).collect())
}

/// Store a message, publish it, and return it
pub async fn send_message(
    store: &dyn DocumentStore,
    realtime: &CentrifugoClient,
    upload_dir: &Path,
    sender: &User,
    draft: MessageDraft,
) -> BackendResult<MessageResponse> {
    let chat_id = draft
        .chat_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| BackendError::validation("Chat ID is required."))?;

    let message_type = match draft.message_type.as_deref().map(str::trim) {
        None | Some("") => MessageType::default(),
        Some(raw) => raw.parse::<MessageType>()?,
    };

    let chat = find_visible_chat(store, chat_id, sender.id, CHAT_ACCESS_DENIED)
        .await
        .map_err(|e| {
            tracing::warn!("{} cannot post to chat {}: {}", sender.username, chat_id, e);
            e
        })?;

    let file = match (&draft.file, message_type) {
        (Some(file), MessageType::File) => Some(uploads::save_upload(upload_dir, file).await?),
        _ => None,
    };

    let message = store
        .insert_message(NewMessage {
            chat_id: chat.id,
            content: draft.content,
            sender_id: sender.id,
            sender_username: sender.username.clone(),
            message_type,
            reply_to: draft.reply_to.filter(|r| !r.is_empty()),
            file,
            created_at: Utc::now(),
        })
        .await?;

    let response = MessageResponse::from(&message);
    tracing::info!("Message {} stored in chat {}", message.id, chat.id);

    publish_new_message(realtime, &response, chat.id, sender.id).await;

    store.touch_chat_activity(chat.id, Utc::now()).await?;

    Ok(response)
}

async fn publish_new_message(
    realtime: &CentrifugoClient,
    message: &MessageResponse,
    chat_id: Uuid,
    sender_id: Uuid,
) {
    let body = match serde_json::to_value(message) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Failed to serialize message {} for publishing: {}", message.id, e);
            return;
        }
    };

    let event = RealtimeEvent::new_message(body, chat_id, sender_id);
    if let Err(e) = realtime.publish(&chat_channel(chat_id), &event).await {
        tracing::error!("Failed to publish message to Centrifugo for chat {}: {}", chat_id, e);
    }
}

/// Publish the caller's typing state to a chat channel
pub async fn publish_typing(realtime: &CentrifugoClient, user: &User, chat_id: &str, is_typing: bool) {
    let event = RealtimeEvent::typing(user.id, user.username.clone(), is_typing);
    if let Err(e) = realtime.publish(&chat_channel(chat_id), &event).await {
        tracing::warn!("Typing indicator for chat {} not delivered: {}", chat_id, e);
    }
}

/// Record the caller's online flag and announce it to all their chats
///
/// One broadcast covers every chat; it is skipped when the user has none.
pub async fn update_online_status(
    store: &dyn DocumentStore,
    realtime: &CentrifugoClient,
    user: &User,
    is_online: bool,
) -> BackendResult<usize> {
    store.set_user_presence(user.id, is_online, Utc::now()).await?;

    let channels: Vec<String> = store
        .list_chats_for_participant(user.id, CHAT_LIST_LIMIT)
        .await?
        .iter()
        .map(|chat| chat_channel(chat.id))
        .collect();

    if channels.is_empty() {
        tracing::debug!("{} has no chats; online status not broadcast", user.username);
        return Ok(0);
    }

    let event = RealtimeEvent::online_status(user.id, user.username.clone(), is_online);
    if let Err(e) = realtime.broadcast(&channels, &event).await {
        tracing::warn!("Online status of {} not delivered: {}", user.username, e);
    }

    Ok(channels.len())
}
