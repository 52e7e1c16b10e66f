//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Account registration, lookup, update, deletion with offset paging
//! - Username + password login issuing signed bearer tokens
//! - Bearer-token guard resolving the caller to a fresh account
//! - Startup seeding of placeholder accounts into an empty store
//!
//! ## Security Model
//! - Passwords hashed with bcrypt (random salt, tunable cost)
//! - Tokens are self-contained HS256 JWTs, valid for one day
//! - Login failures are indistinguishable to the caller, whether the
//!   username is unknown or the password is wrong
//! - Password hashes never appear in responses or logs

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::seed::SeedUseCase;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::{accounts_router, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
