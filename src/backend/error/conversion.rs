/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers return it directly.
 *
 * # Response Format
 *
 * ```json
 * { "detail": "Chat not found or access denied" }
 * ```
 */
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!("[Server] Request failed with {}: {}", status, self);
        } else {
            tracing::debug!("[Server] Request rejected with {}: {}", status, self);
        }

        (status, Json(json!({ "detail": self.message() }))).into_response()
    }
}
