/**
 * Password Hashing
 *
 * bcrypt hashing with a configurable work factor. Verification never fails
 * loudly: a malformed stored hash simply does not match.
 */
use crate::backend::auth::AuthError;

/// Lowest work factor bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest work factor bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt hasher carrying the work factor from configuration
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password with a fresh salt
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            AuthError::Hashing(e.to_string())
        })
    }

    /// Check a plaintext password against a stored hash
    ///
    /// # Returns
    /// `false` on mismatch or when `hash` is not a valid bcrypt hash
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Password verification failed on stored hash: {:?}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
