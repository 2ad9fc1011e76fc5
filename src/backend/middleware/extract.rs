/**
 * Request Extractors
 *
 * `Json` and `Query` wrappers whose rejections are [`BackendError`]s, so a
 * malformed body or query string answers 400 with a `{"detail"}` body like
 * every other client error.
 */
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

/// Query string parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

fn rejection(status: StatusCode, body_text: String) -> BackendError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        BackendError::payload_too_large(body_text)
    } else {
        BackendError::validation(body_text)
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(e) => {
                tracing::debug!("Rejected JSON body: {}", e.body_text());
                Err(rejection(e.status(), e.body_text()))
            }
        }
    }
}

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(e) => {
                tracing::debug!("Rejected query string: {}", e.body_text());
                Err(rejection(e.status(), e.body_text()))
            }
        }
    }
}
