//! Application Configuration

use std::time::Duration;

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for token signing. Process-wide; rotating it invalidates
    /// every outstanding token.
    pub token_secret: Vec<u8>,
    /// Token lifetime (1 day)
    pub token_ttl: Duration,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; 32],
            token_ttl: Duration::from_secs(24 * 3600), // 1 day
            bcrypt_cost: platform::password::DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    /// Create config with an externally supplied token secret
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create config with a random token secret (for development; tokens do
    /// not survive a restart)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Get token TTL in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.as_secs() as i64
    }
}
