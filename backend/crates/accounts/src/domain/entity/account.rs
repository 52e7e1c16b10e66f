//! Account Entity
//!
//! Plain data structs; column metadata lives in the SQL migrations, and the
//! store assigns ids and timestamps.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, username::Username};

/// Account entity
///
/// The password hash is opaque here; only the hasher can interpret it,
/// and it never leaves the backend in responses or logs.
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned numeric identifier, immutable
    pub id: i64,
    /// Unique username (uniqueness enforced by the store)
    pub username: Username,
    /// Email address
    pub email: Email,
    /// Salted one-way digest of the password
    pub password_hash: HashedPassword,
    /// Optional profile picture reference
    pub profile_picture: Option<String>,
    /// Optional profile description
    pub profile_description: Option<String>,
    /// Set by the store on insert
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every update
    pub updated_at: DateTime<Utc>,
}

/// Draft for inserting a new account. The store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewAccountRecord {
    pub username: Username,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub profile_picture: Option<String>,
    pub profile_description: Option<String>,
}

/// Partial update. `None` fields are left unchanged by the store.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub username: Option<Username>,
    pub email: Option<Email>,
    pub profile_picture: Option<String>,
    pub profile_description: Option<String>,
}
