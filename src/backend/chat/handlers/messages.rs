/**
 * Send Message Handler
 *
 * This module implements POST /messages. The same fields arrive through one
 * of three transports, chosen by the request's content type:
 *
 * - `application/json` - `{chat_id, content?, message_type?, reply_to?}`
 * - `multipart/form-data` - the same fields as form parts, plus an optional
 *   `file` part
 * - `application/x-www-form-urlencoded` - the same fields, no file
 *
 * Any other (or missing) content type is read as an empty form, which fails
 * with "Chat ID is required."
 */
use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, Multipart, Request, State,
    },
    http::{header::CONTENT_TYPE, StatusCode},
    response::Json,
    Form,
};

use crate::backend::chat::types::{MessageResponse, SendMessageJson};
use crate::backend::chat::uploads::UploadedFile;
use crate::backend::chat::workflow::{self, MessageDraft};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

impl From<SendMessageJson> for MessageDraft {
    fn from(body: SendMessageJson) -> Self {
        Self {
            chat_id: body.chat_id,
            content: body.content,
            message_type: body.message_type,
            reply_to: body.reply_to,
            file: None,
        }
    }
}

/// Body rejections keep their 413; everything else is a bad request
fn rejection(status: StatusCode, body_text: String) -> BackendError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        BackendError::payload_too_large("File size too large. Maximum size is 10MB.")
    } else {
        BackendError::validation(body_text)
    }
}

fn multipart_error(err: MultipartError) -> BackendError {
    rejection(err.status(), err.body_text())
}

async fn field_text(field: Field<'_>) -> BackendResult<String> {
    field.text().await.map_err(multipart_error)
}

/// Collect a draft from multipart form parts
async fn read_multipart(mut multipart: Multipart) -> BackendResult<MessageDraft> {
    let mut draft = MessageDraft::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "chat_id" => draft.chat_id = Some(field_text(field).await?),
            "content" => draft.content = Some(field_text(field).await?),
            "message_type" => draft.message_type = Some(field_text(field).await?),
            "reply_to" => draft.reply_to = Some(field_text(field).await?),
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty part when no file was chosen
                if !file_name.is_empty() {
                    draft.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => tracing::debug!("Ignoring unknown form field: {}", other),
        }
    }

    Ok(draft)
}

/// Read a draft from whichever transport the request uses
async fn read_draft(state: &AppState, request: Request) -> BackendResult<MessageDraft> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        let body = Bytes::from_request(request, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
        let json: SendMessageJson = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Failed to parse message body: {:?}", e);
            BackendError::validation(format!("Invalid JSON body: {}", e))
        })?;
        return Ok(json.into());
    }

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
        return read_multipart(multipart).await;
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<SendMessageJson>::from_request(request, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
        return Ok(form.into());
    }

    Ok(MessageDraft::default())
}

/// Send message handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing chat id, unknown message type, bad body
/// * `404 Not Found` - Chat missing or caller not a participant
/// * `413 Payload Too Large` - Attached file above 10 MiB
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    request: Request,
) -> BackendResult<Json<MessageResponse>> {
    let draft = read_draft(&state, request).await?;

    let message = workflow::send_message(
        state.store.as_ref(),
        &state.realtime,
        state.upload_dir(),
        &user,
        draft,
    )
    .await?;

    Ok(Json(message))
}
