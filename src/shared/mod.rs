//! Shared Types
//!
//! Platform-agnostic types used across the backend: domain enumerations,
//! real-time event payloads, and the errors they can raise.

/// Real-time event payloads and channel naming
pub mod event;

/// Domain enumerations (roles, chat types, message types)
pub mod models;

/// Shared error types
pub mod error;

pub use error::SharedError;
pub use event::{chat_channel, RealtimeEvent};
pub use models::{ChatType, MessageType, UserRole};
