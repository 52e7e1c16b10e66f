//! Repository Trait
//!
//! Interface for data persistence. Implementation is in the infrastructure
//! layer. Lookup misses are `Ok(None)`, not errors; callers decide what
//! absence means.

use crate::domain::entity::{Account, AccountPatch, NewAccountRecord};
use crate::domain::value_object::username::Username;
use crate::error::AccountResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account; the store assigns id and timestamps
    async fn create(&self, record: &NewAccountRecord) -> AccountResult<Account>;

    /// Find account by id
    async fn find_by_id(&self, id: i64) -> AccountResult<Option<Account>>;

    /// Find account by username
    async fn find_by_username(&self, username: &Username) -> AccountResult<Option<Account>>;

    /// Page of accounts in insertion (id) order
    async fn list(&self, limit: i64, offset: i64) -> AccountResult<Vec<Account>>;

    /// Merge the patch into the stored record; `None` if the id is unknown
    async fn update(&self, id: i64, patch: &AccountPatch) -> AccountResult<Option<Account>>;

    /// Delete an account; `false` if the id is unknown
    async fn delete(&self, id: i64) -> AccountResult<bool>;
}
