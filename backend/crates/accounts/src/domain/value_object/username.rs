//! Username Value Object

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AccountError, AccountResult};

/// Maximum username length (matches the store column width)
const USERNAME_MAX_LENGTH: usize = 50;

/// Username value object
///
/// Required and non-empty; uniqueness is the store's concern, not this
/// type's. Case is preserved; lookups match exactly what was registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new username with validation
    pub fn new(username: impl Into<String>) -> AccountResult<Self> {
        let username = username.into().trim().to_string();

        if username.is_empty() {
            return Err(AccountError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }

        if username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(AccountError::Validation(format!(
                "Username must be at most {} characters",
                USERNAME_MAX_LENGTH
            )));
        }

        Ok(Self(username))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = AccountError;

    fn from_str(s: &str) -> AccountResult<Self> {
        Username::new(s)
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
