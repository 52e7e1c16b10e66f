//! Account Routers

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AccountRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::require_bearer_token;

/// Create the login router with the PostgreSQL repository
pub fn auth_router(repo: PgAccountRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic login router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}

/// Create the bearer-protected account CRUD router with the PostgreSQL
/// repository
pub fn accounts_router(repo: PgAccountRepository, config: AuthConfig) -> Router {
    accounts_router_generic(repo, config)
}

/// Create a generic account CRUD router for any repository implementation.
/// Every route requires a valid bearer token.
pub fn accounts_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            post(handlers::create_account::<R>).get(handlers::list_accounts::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_account::<R>)
                .put(handlers::update_account::<R>)
                .delete(handlers::delete_account::<R>),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_token::<R>,
        ))
        .with_state(state)
}
