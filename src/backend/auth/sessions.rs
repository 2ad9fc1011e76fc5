/**
 * Session Tokens
 *
 * Stateless HS256 bearer tokens whose subject is the user id. A token stays
 * valid until its absolute expiry (7 days after issuance), including after
 * logout: nothing is revoked server-side.
 */
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Lifetime of a session token
pub const SESSION_TTL_DAYS: i64 = 7;

/// Authentication failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer credentials on the request
    #[error("Not authenticated")]
    MissingCredentials,

    /// Bad signature, malformed token, missing subject or expired
    #[error("Invalid token")]
    Invalid,

    /// Token is valid but its subject no longer resolves to a user
    #[error("User not found")]
    UserNotFound,

    /// Token could not be signed
    #[error("Failed to sign token: {0}")]
    Signing(String),

    /// Password could not be hashed
    #[error("Failed to hash password: {0}")]
    Hashing(String),
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// A freshly signed session token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens with the server secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(SESSION_TTL_DAYS),
        }
    }

    /// Create a token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID), becomes the `sub` claim
    ///
    /// # Returns
    /// Signed token with its issue and expiry instants
    pub fn issue_token(&self, user_id: Uuid) -> Result<IssuedToken, AuthError> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp() as u64,
            iat: issued_at.timestamp() as u64,
        };

        let token = encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            AuthError::Signing(e.to_string())
        })?;

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Verify a token and return its subject
    ///
    /// Expiry, signature and format failures are all reported as
    /// [`AuthError::Invalid`].
    pub fn verify_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
            tracing::debug!("Token verification failed: {:?}", e);
            AuthError::Invalid
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::Invalid)
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
