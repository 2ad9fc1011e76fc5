/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by email
 * 2. Verify the password against the stored bcrypt hash
 * 3. Mark the user online and stamp last-seen
 * 4. Issue a 7-day session token
 * 5. Append a session audit record
 *
 * An unknown email and a wrong password produce the same 401.
 */
use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse, UserResponse};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::JsonBody;
use crate::backend::server::state::AppState;
use crate::backend::store::NewSession;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Persistence or token signing failure
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> BackendResult<Json<TokenResponse>> {
    tracing::info!("Login attempt for: {}", request.email);

    let user = match state.store.find_user_by_email(&request.email).await? {
        Some(user) if state.passwords.verify(&request.password, &user.password_hash) => user,
        _ => {
            tracing::warn!("Invalid credentials for: {}", request.email);
            return Err(BackendError::unauthorized("Invalid credentials"));
        }
    };

    let issued = state.sessions.issue_token(user.id)?;

    state
        .store
        .set_user_presence(user.id, true, issued.issued_at)
        .await?;

    if let Err(e) = state
        .store
        .insert_session(NewSession {
            user_id: user.id,
            issued_at: issued.issued_at,
            expires_at: issued.expires_at,
        })
        .await
    {
        tracing::warn!("Failed to record session for {}: {}", user.id, e);
    }

    tracing::info!("User logged in successfully: {} ({})", user.username, user.id);

    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "bearer".to_string(),
        user: UserResponse::from(&user),
    }))
}
