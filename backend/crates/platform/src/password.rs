//! Password Hashing and Verification
//!
//! Credential handling built on bcrypt:
//! - Randomly salted, cost-tunable one-way digests
//! - Zeroization of plaintext material
//! - Constant-time comparison (bcrypt-internal)
//!
//! A malformed digest never raises during verification; it simply fails
//! to match.

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length in bytes. bcrypt ignores input past 72 bytes,
/// so longer passwords would silently verify against a truncated prefix.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Default bcrypt work factor.
pub const DEFAULT_COST: u32 = 10;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization.
///
/// Erased from memory when dropped. Does not implement `Clone`, and Debug
/// output is redacted, so the plaintext cannot leak through logging or
/// accidental copies.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation.
    ///
    /// Unicode is normalized using NFKC before validation so that visually
    /// identical input hashes identically across clients.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        let byte_count = normalized.len();
        if byte_count > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: byte_count,
            });
        }

        Ok(Self(normalized))
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with bcrypt.
    ///
    /// Every call generates a fresh random salt, so the same plaintext
    /// hashed twice yields different digests that both verify.
    ///
    /// ## Arguments
    /// * `cost` - bcrypt work factor; [`DEFAULT_COST`] unless tuning
    pub fn hash(&self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        let digest = bcrypt::hash(self.as_bytes(), cost)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword { digest })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Salted bcrypt digest, safe to persist.
///
/// The digest string carries the algorithm version, cost and salt, so no
/// extra bookkeeping is needed to verify against it later.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    digest: String,
}

impl HashedPassword {
    /// Create from a stored digest string (e.g. from the database).
    ///
    /// The digest is not validated here; a corrupt value simply fails
    /// every [`verify`](Self::verify) call.
    pub fn from_digest(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
        }
    }

    /// Get the digest string for storage
    pub fn as_str(&self) -> &str {
        &self.digest
    }

    /// Verify a password against this digest.
    ///
    /// bcrypt compares in constant time internally. A malformed digest
    /// returns `false` rather than an error.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        bcrypt::verify(password.as_bytes(), &self.digest).unwrap_or(false)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("digest", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the test suite fast; the work factor does not change
    // verification semantics.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let password = ClearTextPassword::new("correct horse".to_string()).unwrap();
        let hashed = password.hash(TEST_COST).unwrap();
        assert!(hashed.verify(&password));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let password = ClearTextPassword::new("correct horse".to_string()).unwrap();
        let other = ClearTextPassword::new("battery staple".to_string()).unwrap();
        let hashed = password.hash(TEST_COST).unwrap();
        assert!(!hashed.verify(&other));
    }

    #[test]
    fn test_salt_uniqueness() {
        let password = ClearTextPassword::new("correct horse".to_string()).unwrap();
        let first = password.hash(TEST_COST).unwrap();
        let second = password.hash(TEST_COST).unwrap();
        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify(&password));
        assert!(second.verify(&password));
    }

    #[test]
    fn test_verify_malformed_digest_is_false() {
        let password = ClearTextPassword::new("correct horse".to_string()).unwrap();
        let malformed = HashedPassword::from_digest("not-a-bcrypt-digest");
        assert!(!malformed.verify(&password));

        let empty = HashedPassword::from_digest("");
        assert!(!empty.verify(&password));
    }

    #[test]
    fn test_policy_too_short() {
        let err = ClearTextPassword::new("abc12".to_string()).unwrap_err();
        assert_eq!(err, PasswordPolicyError::TooShort { min: 6, actual: 5 });
    }

    #[test]
    fn test_policy_empty_or_whitespace() {
        assert!(matches!(
            ClearTextPassword::new("   ".to_string()),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
        assert!(matches!(
            ClearTextPassword::new(String::new()),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_policy_too_long() {
        let long = "x".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(
            ClearTextPassword::new(long),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_nfkc_normalization_applied() {
        // U+FF41 FULLWIDTH LATIN SMALL LETTER A normalizes to 'a' under NFKC
        let fullwidth = ClearTextPassword::new("\u{ff41}bcdef".to_string()).unwrap();
        let ascii = ClearTextPassword::new("abcdef".to_string()).unwrap();
        let hashed = ascii.hash(TEST_COST).unwrap();
        assert!(hashed.verify(&fullwidth));
    }

    #[test]
    fn test_debug_output_redacted() {
        let password = ClearTextPassword::new("supersecret".to_string()).unwrap();
        let debug = format!("{:?}", password);
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("REDACTED"));

        let hashed = password.hash(TEST_COST).unwrap();
        let debug = format!("{:?}", hashed);
        assert!(!debug.contains(hashed.as_str()));
    }
}
