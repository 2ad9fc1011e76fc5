//! Shared Error Types
//!
//! Errors raised while parsing or validating the domain values in
//! [`crate::shared`]. The backend folds them into `BackendError`, where a
//! validation failure becomes a 400 response.
use thiserror::Error;

/// Errors produced by shared domain types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A field carried a value outside its allowed set
    #[error("Invalid value for '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
