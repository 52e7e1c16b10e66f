//! Login Use Case
//!
//! Verifies credentials and mints a bearer token. No session state is
//! stored; the token is the only artifact of a successful login.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::username::Username;
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Bearer token for subsequent requests
    pub access_token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Check a username/password pair against the store.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller; the distinction exists only in the logs.
    pub async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AccountResult<Account> {
        let username = Username::new(username).map_err(|_| AccountError::InvalidCredentials)?;

        let account = self.repo.find_by_username(&username).await?;

        let Some(account) = account else {
            tracing::debug!(username = %username, "Login attempt for unknown username");
            return Err(AccountError::InvalidCredentials);
        };

        let password = ClearTextPassword::new(password.to_string())
            .map_err(|_| AccountError::InvalidCredentials)?;

        if !account.password_hash.verify(&password) {
            tracing::debug!(account_id = account.id, "Login attempt with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Mint a token for an already-verified account
    pub fn login(&self, account: &Account) -> AccountResult<LoginOutput> {
        let issuer = TokenIssuer::from_config(&self.config);
        let access_token = issuer.issue(account.id, account.username.as_str())?;

        tracing::info!(account_id = account.id, "Account logged in");

        Ok(LoginOutput { access_token })
    }

    /// Full flow: verify credentials, then mint a token
    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        let account = self
            .validate_credentials(&input.username, &input.password)
            .await?;
        self.login(&account)
    }
}
