//! dtalks - Chat Backend
//!
//! A chat service with direct and group chats, file attachments and
//! real-time delivery through a Centrifugo gateway.
//!
//! # Module Structure
//!
//! - **`shared`** - Enumerations, real-time event payloads and shared errors
//! - **`backend`** - Axum HTTP server, persistence and gateway integration
//!
//! # Usage
//!
//! ```rust,no_run
//! use dtalks::backend::server::init::create_app;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let app = create_app().await?;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
