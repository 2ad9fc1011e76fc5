//! Middleware Module
//!
//! HTTP middleware and extractors for the backend server.
//!
//! - **`auth`** - Bearer token authentication for protected routes
//! - **`extract`** - `Json`/`Query` wrappers that reject with `BackendError`

pub mod auth;
pub mod extract;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
pub use extract::{JsonBody, QueryParams};
