//! Backend Error Module
//!
//! Error types returned by HTTP handlers, convertible to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Lower layers keep their own errors (`StoreError`, `AuthError`,
//! `RealtimeError`). The first two convert into `BackendError` via `From`;
//! realtime errors never reach a response and are only logged.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;

/// Result alias for handlers
pub type BackendResult<T> = Result<T, BackendError>;
