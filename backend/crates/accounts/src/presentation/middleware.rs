//! Auth Middleware
//!
//! Middleware for requiring a valid bearer token on protected routes.
//! Rejected requests reach no handler and learn nothing beyond
//! "unauthorized".

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::AuthStrategy;
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::error::AccountError;
use crate::presentation::handlers::AccountAppState;

/// The caller's account, resolved by the bearer guard and stored in
/// request extensions for downstream handlers
#[derive(Clone)]
pub struct CurrentAccount(pub Account);

/// Middleware that requires a valid bearer token
pub async fn require_bearer_token<R>(
    State(state): State<AccountAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let Some(token) = bearer_token(req.headers()) else {
        return Err(AccountError::InvalidToken.into_response());
    };

    let strategy = AuthStrategy::BearerToken {
        token: token.to_string(),
    };

    let account = strategy
        .authenticate(state.repo.clone(), state.config.clone())
        .await
        .map_err(IntoResponse::into_response)?;

    req.extensions_mut().insert(CurrentAccount(account));

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
