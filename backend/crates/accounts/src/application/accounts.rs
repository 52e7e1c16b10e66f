//! Account Service
//!
//! CRUD orchestration over the repository. Hashes the password on create;
//! everything else is validation plus passthrough. Lookup misses surface
//! as `None`, and the presentation layer decides whether that is a 404.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{Account, AccountPatch, NewAccountRecord};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::{AccountError, AccountResult};

/// Default page size for listings
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Create account input
pub struct CreateAccountInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Update account input. Absent fields are left unchanged. Passwords are
/// not updatable through this surface.
#[derive(Default)]
pub struct UpdateAccountInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    pub profile_description: Option<String>,
}

/// Account service
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Validate the draft, hash the password, and persist
    pub async fn create(&self, input: CreateAccountInput) -> AccountResult<Account> {
        let username = Username::new(input.username)?;
        let email = Email::new(input.email)?;

        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash(self.config.bcrypt_cost)?;

        let record = NewAccountRecord {
            username,
            email,
            password_hash,
            profile_picture: None,
            profile_description: None,
        };

        let account = self.repo.create(&record).await.map_err(|e| {
            tracing::error!(error = %e, "Account creation failed");
            AccountError::CreationFailed
        })?;

        tracing::info!(
            account_id = account.id,
            username = %account.username,
            "Account created"
        );

        Ok(account)
    }

    /// Page of accounts in insertion order. Out-of-range limit/page values
    /// fall back to the defaults; there is no upper bound on limit.
    pub async fn list(&self, limit: i64, page: i64) -> AccountResult<Vec<Account>> {
        let limit = if limit < 1 { DEFAULT_PAGE_SIZE } else { limit };
        let page = if page < 1 { 1 } else { page };
        let offset = (page - 1) * limit;

        self.repo.list(limit, offset).await
    }

    /// Single-record lookup; absence is a normal outcome
    pub async fn get_by_id(&self, id: i64) -> AccountResult<Option<Account>> {
        self.repo.find_by_id(id).await
    }

    /// Single-record lookup by username; a malformed username matches
    /// nothing
    pub async fn get_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        let Ok(username) = Username::new(username) else {
            return Ok(None);
        };
        self.repo.find_by_username(&username).await
    }

    /// Merge the provided fields into the stored record and return the
    /// refreshed record
    pub async fn update(&self, id: i64, input: UpdateAccountInput) -> AccountResult<Account> {
        let patch = AccountPatch {
            username: input.username.map(Username::new).transpose()?,
            email: input.email.map(Email::new).transpose()?,
            profile_picture: input.profile_picture,
            profile_description: input.profile_description,
        };

        let updated = self.repo.update(id, &patch).await.map_err(|e| {
            tracing::error!(error = %e, account_id = id, "Account update failed");
            AccountError::UpdateFailed
        })?;

        let account = updated.ok_or(AccountError::NotFound)?;

        tracing::info!(account_id = account.id, "Account updated");

        Ok(account)
    }

    /// Delete an account; a nonexistent id is reported, never silently
    /// ignored
    pub async fn delete(&self, id: i64) -> AccountResult<()> {
        let deleted = self.repo.delete(id).await.map_err(|e| {
            tracing::error!(error = %e, account_id = id, "Account deletion failed");
            AccountError::DeletionFailed
        })?;

        if !deleted {
            return Err(AccountError::NotFound);
        }

        tracing::info!(account_id = id, "Account deleted");

        Ok(())
    }
}
