//! Common test utilities and helpers
//!
//! - Application fixture backed by the in-memory store and a mock gateway
//! - Authentication and chat test helpers
//! - Response assertions

pub mod app;
pub mod chat_helpers;

pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
pub use chat_helpers::*;
