//! Authentication Module
//!
//! This module handles user registration, login and the credential services
//! behind them.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── passwords.rs - bcrypt hashing
//! ├── sessions.rs  - Session token issue and verification
//! └── handlers/    - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email and password → user created
//! 2. **Login**: email and password verified → bearer token returned
//! 3. **Requests**: bearer token verified by the auth middleware, which
//!    resolves its subject to a stored user
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless and expire after 7 days
//! - Logout does not revoke tokens
//! - Invalid credentials return 401 without saying which field was wrong

/// Password hashing
pub mod passwords;

/// Session token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, logout, register, search_users, UserResponse};
pub use passwords::PasswordHasher;
pub use sessions::{AuthError, IssuedToken, SessionKeys};
