//! Chat Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports
//! ├── chats.rs    - Chat create/list/get and message history
//! ├── messages.rs - Send message (JSON, multipart, url-encoded)
//! ├── typing.rs   - Typing indicator
//! └── presence.rs - Online status
//! ```

/// Chat CRUD and message history handlers
pub mod chats;

/// Send message handler
pub mod messages;

/// Typing indicator handler
pub mod typing;

/// Online status handler
pub mod presence;

pub use chats::{create_chat, get_chat, get_chat_messages, list_chats};
pub use messages::send_message;
pub use presence::update_online_status;
pub use typing::handle_typing_event;
