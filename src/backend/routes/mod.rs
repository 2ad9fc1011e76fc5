//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, middleware and layers
//! - **`api_routes`** - Account, user and gateway endpoints
//! - **`chat_routes`** - Chats, messages, typing and online status
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── api_routes.rs   - Account and gateway routes
//! └── chat_routes.rs  - Chat routes
//! ```
//!
//! # Authentication
//!
//! Only `/auth/register`, `/auth/login`, `/health`, `/ws/{user_id}` and
//! `/uploads` are public. Every other route sits behind
//! [`crate::backend::middleware::auth_middleware`].

/// Main router creation
pub mod router;

/// Chat-related routes
pub mod chat_routes;

/// Account and gateway routes
pub mod api_routes;

pub use router::create_router;
