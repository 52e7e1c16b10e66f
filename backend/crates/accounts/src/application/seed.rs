//! Startup Seeder
//!
//! Populates an empty store with placeholder accounts so a fresh
//! deployment has something to log into. A non-empty store is left alone.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::NewAccountRecord;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::AccountResult;

/// Number of placeholder accounts created into an empty store
pub const SEED_ACCOUNT_COUNT: u64 = 20;

/// Placeholder password shared by seeded accounts
const SEED_PASSWORD: &str = "password123";

/// Seed use case
pub struct SeedUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SeedUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Seed placeholder accounts if the store is empty.
    ///
    /// Returns the number of accounts created (zero when seeding was
    /// skipped).
    pub async fn execute(&self) -> AccountResult<u64> {
        let existing = self.repo.list(1, 0).await?;
        if !existing.is_empty() {
            tracing::info!("Accounts already exist, skipping placeholder seeding");
            return Ok(0);
        }

        for index in 1..=SEED_ACCOUNT_COUNT {
            // Each account gets its own salt even though the placeholder
            // password is shared
            let password = ClearTextPassword::new(SEED_PASSWORD.to_string())?;
            let password_hash = password.hash(self.config.bcrypt_cost)?;

            let record = NewAccountRecord {
                username: Username::new(format!("user{index}"))?,
                email: Email::new(format!("user{index}@example.com"))?,
                password_hash,
                profile_picture: None,
                profile_description: None,
            };

            self.repo.create(&record).await?;
        }

        tracing::info!(
            accounts_created = SEED_ACCOUNT_COUNT,
            "Placeholder accounts seeded"
        );

        Ok(SEED_ACCOUNT_COUNT)
    }
}
