//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::accounts::DEFAULT_PAGE_SIZE;
use crate::application::{
    AccountService, AuthStrategy, CreateAccountInput, LoginUseCase, UpdateAccountInput,
};
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    AccountResponse, CreateAccountRequest, ListAccountsQuery, LoginRequest, LoginResponse,
    UpdateAccountRequest,
};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<Json<LoginResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let strategy = AuthStrategy::LocalCredentials {
        username: req.username,
        password: req.password,
    };

    let account = strategy
        .authenticate(state.repo.clone(), state.config.clone())
        .await?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.login(&account)?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
    }))
}

// ============================================================================
// Account CRUD
// ============================================================================

/// POST /usuarios
pub async fn create_account<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<CreateAccountRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let service = AccountService::new(state.repo.clone(), state.config.clone());

    let input = CreateAccountInput {
        username: req.username,
        email: req.email,
        password: req.password,
    };

    let account = service.create(input).await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// GET /usuarios?limit=&page=
pub async fn list_accounts<R>(
    State(state): State<AccountAppState<R>>,
    Query(query): Query<ListAccountsQuery>,
) -> AccountResult<Json<Vec<AccountResponse>>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let service = AccountService::new(state.repo.clone(), state.config.clone());

    let accounts = service
        .list(
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            query.page.unwrap_or(1),
        )
        .await?;

    Ok(Json(
        accounts.into_iter().map(AccountResponse::from).collect(),
    ))
}

/// GET /usuarios/{id}
pub async fn get_account<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<i64>,
) -> AccountResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let service = AccountService::new(state.repo.clone(), state.config.clone());

    let account = service.get_by_id(id).await?.ok_or(AccountError::NotFound)?;

    Ok(Json(AccountResponse::from(account)))
}

/// PUT /usuarios/{id}
pub async fn update_account<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAccountRequest>,
) -> AccountResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let service = AccountService::new(state.repo.clone(), state.config.clone());

    let input = UpdateAccountInput {
        username: req.username,
        email: req.email,
        profile_picture: req.profile_picture,
        profile_description: req.profile_description,
    };

    let account = service.update(id, input).await?;

    Ok(Json(AccountResponse::from(account)))
}

/// DELETE /usuarios/{id}
pub async fn delete_account<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<i64>,
) -> AccountResult<StatusCode>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let service = AccountService::new(state.repo.clone(), state.config.clone());

    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
