//! Authentication Strategies
//!
//! Explicit dispatch over the two supported ways a request proves who it
//! is: local credentials at login, a bearer token everywhere else. Both
//! resolve to the same thing, a verified [`Account`].

use std::sync::Arc;

use crate::application::authorize::AuthorizeUseCase;
use crate::application::config::AuthConfig;
use crate::application::login::LoginUseCase;
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::error::AccountResult;

/// The two authentication strategies
pub enum AuthStrategy {
    /// Username/password pair presented to the login endpoint
    LocalCredentials { username: String, password: String },
    /// Bearer token presented on a protected endpoint
    BearerToken { token: String },
}

impl AuthStrategy {
    /// Run the strategy against the store and resolve the account
    pub async fn authenticate<R>(
        &self,
        repo: Arc<R>,
        config: Arc<AuthConfig>,
    ) -> AccountResult<Account>
    where
        R: AccountRepository,
    {
        match self {
            AuthStrategy::LocalCredentials { username, password } => {
                LoginUseCase::new(repo, config)
                    .validate_credentials(username, password)
                    .await
            }
            AuthStrategy::BearerToken { token } => {
                AuthorizeUseCase::new(repo, config).execute(token).await
            }
        }
    }
}
