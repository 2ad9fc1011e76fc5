//! Chat Backend Module
//!
//! This module contains all server-side chat functionality:
//! - Chat creation with direct-chat reuse and participant-name enrichment
//! - Message sending with optional file attachments
//! - Typing and online-status fan-out through the real-time gateway
//!
//! # Architecture
//!
//! - **`workflow`** - The operations, independent of HTTP
//! - **`handlers`** - Axum handlers that parse requests and call the workflow
//! - **`types`** - Request and response bodies
//! - **`uploads`** - Attachment storage on disk

/// Chat and message operations
pub mod workflow;

/// HTTP handlers
pub mod handlers;

/// Request and response types
pub mod types;

/// Attachment storage
pub mod uploads;

pub use types::{ChatResponse, CreateChatRequest, MessageResponse, MessagesQuery};
pub use uploads::{UploadedFile, MAX_FILE_SIZE};
pub use workflow::MessageDraft;
