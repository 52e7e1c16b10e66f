//! Authorize Use Case
//!
//! Validates an inbound bearer token and resolves it to a fresh account.
//! The signed subject id is trusted directly; the username claim is not
//! consulted, so renames cannot desynchronize authorization.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};

/// Authorize use case
pub struct AuthorizeUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AuthorizeUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Verify the token and resolve the caller's account.
    ///
    /// An account deleted since issuance fails the same way as a bad
    /// token; the caller learns nothing beyond "unauthorized".
    pub async fn execute(&self, token: &str) -> AccountResult<Account> {
        let issuer = TokenIssuer::from_config(&self.config);
        let claims = issuer.verify(token)?;

        let account = self
            .repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AccountError::InvalidToken)?;

        Ok(account)
    }
}
