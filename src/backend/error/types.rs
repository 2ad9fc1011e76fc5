/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler. Each
 * variant maps onto exactly one status code so handlers can use `?` on store,
 * auth and validation failures without choosing a status themselves.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` - malformed or missing input (400)
 * - `Unauthorized` - missing, invalid or expired bearer token (401)
 * - `Conflict` - duplicate unique value such as an email (400)
 * - `NotFound` - missing resource, or one the caller may not see (404)
 * - `PayloadTooLarge` - uploaded file above the size ceiling (413)
 *
 * ## Server Errors
 *
 * Store, upload and internal failures all answer 500 with a generic detail.
 * The underlying error is logged when the response is built.
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::AuthError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request input failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Caller could not be authenticated
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// A unique value is already taken
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Resource missing or not visible to the caller
    ///
    /// Both cases share one variant so a foreign chat cannot be told apart
    /// from a chat that does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Uploaded payload exceeds the configured ceiling
    #[error("Payload too large: {message}")]
    PayloadTooLarge {
        /// Human-readable error message
        message: String,
    },

    /// Persistence failure
    #[error("Store error: {0}")]
    Store(StoreError),

    /// Writing an uploaded file failed
    #[error("Upload error: {message}")]
    Upload {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected server-side failure
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new payload-too-large error
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }

    /// Create a new upload error
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `Conflict` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `PayloadTooLarge` - 413 Payload Too Large
    /// - `SharedError` - 400 Bad Request
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Upload { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message shown to the client
    ///
    /// Server-side failures collapse to a generic message; the detailed
    /// error is only written to the log.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Unauthorized { message }
            | Self::Conflict { message }
            | Self::NotFound { message }
            | Self::PayloadTooLarge { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::Upload { .. } => "Error processing file".to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    /// Whether this error is the server's fault
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { .. } => Self::conflict(err.to_string()),
            other => Self::Store(other),
        }
    }
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(message) | AuthError::Hashing(message) => Self::internal(message),
            other => Self::unauthorized(other.to_string()),
        }
    }
}
