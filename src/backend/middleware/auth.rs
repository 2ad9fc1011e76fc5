/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the bearer token from the
 * Authorization header, resolves its subject to a stored user and hands that
 * user to handlers.
 */
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::AuthError;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::User;

/// The authenticated caller, stored in request extensions
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Pull the token out of `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::MissingCredentials)?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    Ok(token.trim())
}

/// Resolve a bearer token to its user
pub async fn authenticate(state: &AppState, token: &str) -> Result<User, BackendError> {
    let user_id = state.sessions.verify_token(token)?;

    state
        .store
        .find_user_by_id(user_id)
        .await?
        .ok_or(AuthError::UserNotFound)
        .map_err(BackendError::from)
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies the token
/// 3. Loads the user named by the token's subject
/// 4. Attaches the user to request extensions for use in handlers
///
/// Returns 401 Unauthorized if the token is missing, invalid, expired, or
/// names a user that no longer exists.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).map_err(|e| {
        tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        BackendError::from(e)
    })?
    .to_string();

    let user = authenticate(&state, &token).await.map_err(|e| {
        tracing::warn!("Authentication failed: {}", e);
        e
    })?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only usable on routes behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .map(|current| AuthUser(current.0.clone()))
            .ok_or_else(|| {
                tracing::warn!("CurrentUser not found in request extensions");
                BackendError::from(AuthError::MissingCredentials)
            })
    }
}
