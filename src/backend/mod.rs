//! Backend Module
//!
//! This module contains all server-side code for the dtalks chat service:
//! an Axum HTTP API over a document store, with real-time fan-out through a
//! Centrifugo gateway.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, password hashing, session tokens
//! - **`middleware`** - Bearer token authentication
//! - **`chat`** - Chats, messages, attachments, typing, online status
//! - **`realtime`** - Gateway client and token endpoints
//! - **`socket`** - WebSocket echo endpoint
//! - **`store`** - Document store trait with PostgreSQL and in-memory backends
//! - **`error`** - Backend error types and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── chat/           - Chat handlers and workflow
//! ├── realtime/       - Gateway client
//! ├── socket/         - WebSocket echo
//! ├── store/          - Persistence
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Handlers return [`error::BackendResult`]; every failure becomes a JSON
//! body of the form `{"detail": "..."}` with the matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat-related backend functionality
pub mod chat;

/// Real-time gateway
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// WebSocket echo endpoint
pub mod socket;

/// Document persistence
pub mod store;

pub use error::BackendError;
pub use server::create_app;
