/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Reject if a user already holds the email or the username
 * 3. Hash password using bcrypt
 * 4. Create user with role `user`
 * 5. Return the public user record
 *
 * The unique indexes on email and username back up step 2, so two concurrent
 * registrations cannot both succeed.
 */
use axum::{extract::State, response::Json};
use chrono::Utc;

use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::JsonBody;
use crate::backend::server::state::AppState;
use crate::backend::store::NewUser;
use crate::shared::UserRole;

/// Validate the registration fields
///
/// Emails need one `@` with text on both sides. Usernames and passwords must
/// not be blank.
pub(crate) fn validate_registration(request: &RegisterRequest) -> Result<(), BackendError> {
    if request.username.trim().is_empty() {
        return Err(BackendError::validation("Username is required"));
    }

    match request.email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
        _ => return Err(BackendError::validation("Invalid email format")),
    }

    if request.password.is_empty() {
        return Err(BackendError::validation("Password is required"));
    }

    Ok(())
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid input, or email/username already taken
/// * `500 Internal Server Error` - Hashing or persistence failure
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> BackendResult<Json<UserResponse>> {
    tracing::info!("Register request for username: {}, email: {}", request.username, request.email);

    validate_registration(&request).map_err(|e| {
        tracing::warn!("Rejected registration for {}: {}", request.email, e);
        e
    })?;

    if state
        .store
        .find_user_by_email_or_username(&request.email, &request.username)
        .await?
        .is_some()
    {
        tracing::warn!("User already exists: {} / {}", request.username, request.email);
        return Err(BackendError::conflict(
            "User with this email or username already exists",
        ));
    }

    let password_hash = state.passwords.hash(&request.password)?;

    let user = state
        .store
        .insert_user(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role: UserRole::User,
            profile_picture: request.profile_picture,
            created_at: Utc::now(),
        })
        .await
        .map_err(|e| {
            tracing::warn!("Failed to create user: {}", e);
            BackendError::from(e)
        })?;

    tracing::info!("User created successfully: {} ({})", user.username, user.id);

    Ok(Json(UserResponse::from(user)))
}
