//! Application Layer
//!
//! Use cases and application services.

pub mod accounts;
pub mod authorize;
pub mod config;
pub mod login;
pub mod seed;
pub mod strategy;
pub mod token;

// Re-exports
pub use accounts::{AccountService, CreateAccountInput, UpdateAccountInput};
pub use authorize::AuthorizeUseCase;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use seed::SeedUseCase;
pub use strategy::AuthStrategy;
pub use token::{Claims, TokenIssuer};
