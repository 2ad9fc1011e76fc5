//! Real-time Gateway Module
//!
//! Fan-out of chat events through a hosted Centrifugo gateway. The backend
//! never holds subscriber connections itself: it publishes over the gateway's
//! HTTP API and hands browsers a channel token to connect directly.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs        - Module exports and documentation
//! ├── centrifugo.rs - Gateway API client and channel tokens
//! └── handlers.rs   - Token and diagnostic endpoints
//! ```
//!
//! # Channels
//!
//! Each chat maps to the channel `chat-<chat_id>`; see
//! [`crate::shared::chat_channel`]. Event payloads are
//! [`crate::shared::RealtimeEvent`] values.

/// Gateway API client
pub mod centrifugo;

/// Token and diagnostic handlers
pub mod handlers;

pub use centrifugo::{CentrifugoClient, RealtimeError, CHANNEL_TOKEN_TTL_SECS};
