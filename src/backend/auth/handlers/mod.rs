//! Authentication Handlers Module
//!
//! HTTP handlers for registration, login, logout and user lookup.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── logout.rs   - Logout handler
//! └── me.rs       - Current user and user search handlers
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /auth/register
//! - **`login`** - POST /auth/login
//! - **`logout`** - POST /auth/logout
//! - **`get_me`** - GET /users/me
//! - **`search_users`** - GET /users

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Current user and search handlers
pub mod me;

pub use types::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};

pub use login::login;
pub use logout::logout;
pub use me::{get_me, search_users};
pub use register::register;
