//! Password hashing using bcrypt
//!
//! Provides salted, adaptive password hashing and verification.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. Request handlers use the `_async`
//! variants, which run the work on the blocking thread pool.

use anyhow::Result;
use blog_shared::validation::MAX_PASSWORD_BYTES;

/// Password hashing service
///
/// Every hash embeds its own random salt and cost factor, so two hashes of
/// the same password never compare equal and verification needs no
/// configuration.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordService {
    /// Create a hasher with the given bcrypt cost factor (4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password (blocking operation)
    ///
    /// bcrypt silently ignores input past 72 bytes, so longer passwords are
    /// refused rather than truncated.
    pub fn hash(&self, password: &str) -> Result<String> {
        if password.len() > MAX_PASSWORD_BYTES {
            anyhow::bail!("Password exceeds {} bytes", MAX_PASSWORD_BYTES);
        }
        bcrypt::hash(password, self.cost)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// A mismatch is `Ok(false)`; an unparseable hash is an error. Input
    /// longer than any hashable password never matches.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        bcrypt::verify(password, hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
