/**
 * Authentication Handler Types
 *
 * Request and response bodies of the authentication and user endpoints.
 * `UserResponse` is the single public shape of a user; the password hash
 * never leaves the store layer.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::store::User;
use crate::shared::UserRole;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    /// Plaintext, hashed before storage
    pub password: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    /// Session token, valid for 7 days
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: String,
    pub user: UserResponse,
}

/// Query string of `GET /users`
#[derive(Deserialize, Debug, Default)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            profile_picture: user.profile_picture.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
