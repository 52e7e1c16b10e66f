//! Token Issuance and Verification
//!
//! Self-contained HS256 bearer tokens. There is no refresh mechanism and no
//! server-side revocation; a token stops working only through expiry or a
//! secret rotation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::config::AuthConfig;
use crate::error::{AccountError, AccountResult};

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: i64,
    /// Username copied at issuance time; may go stale if the account is
    /// renamed afterwards
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token issuer holding the process-wide signing secret
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.token_secret, config.token_ttl)
    }

    /// Issue a signed token for the given identity
    pub fn issue(&self, subject: i64, username: &str) -> AccountResult<String> {
        self.issue_at(subject, username, Utc::now())
    }

    /// Issue a signed token with an explicit clock
    pub fn issue_at(
        &self,
        subject: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> AccountResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: subject,
            username: username.to_string(),
            iat,
            exp: iat + self.ttl.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AccountError::AuthenticationFailed)
    }

    /// Verify signature integrity and expiry.
    ///
    /// Malformed structure, a bad signature, and an elapsed expiry all
    /// collapse into the same failure.
    pub fn verify(&self, token: &str) -> AccountResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AccountError::InvalidToken)?;

        Ok(data.claims)
    }
}
