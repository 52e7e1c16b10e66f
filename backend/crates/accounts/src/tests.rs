//! Integration-style tests for the accounts crate
//!
//! An in-memory repository stands in for PostgreSQL so the full
//! login/authorize/CRUD flows can run without a database.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::seed::{SEED_ACCOUNT_COUNT, SeedUseCase};
use crate::application::token::TokenIssuer;
use crate::application::{
    AccountService, AuthorizeUseCase, CreateAccountInput, LoginInput, LoginUseCase,
    UpdateAccountInput,
};
use crate::domain::entity::{Account, AccountPatch, NewAccountRecord};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::username::Username;
use crate::error::{AccountError, AccountResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemoryAccountRepository {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    accounts: Vec<Account>,
}

impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, record: &NewAccountRecord) -> AccountResult<Account> {
        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now();
        let account = Account {
            id: state.next_id,
            username: record.username.clone(),
            email: record.email.clone(),
            password_hash: record.password_hash.clone(),
            profile_picture: record.profile_picture.clone(),
            profile_description: record.profile_description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> AccountResult<Option<Account>> {
        let state = self.inner.lock().unwrap();
        Ok(state.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> AccountResult<Option<Account>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .accounts
            .iter()
            .find(|a| a.username == *username)
            .cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> AccountResult<Vec<Account>> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .accounts
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, patch: &AccountPatch) -> AccountResult<Option<Account>> {
        let mut state = self.inner.lock().unwrap();
        let Some(account) = state.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(username) = &patch.username {
            account.username = username.clone();
        }
        if let Some(email) = &patch.email {
            account.email = email.clone();
        }
        if let Some(picture) = &patch.profile_picture {
            account.profile_picture = Some(picture.clone());
        }
        if let Some(description) = &patch.profile_description {
            account.profile_description = Some(description.clone());
        }
        account.updated_at = Utc::now();
        Ok(Some(account.clone()))
    }

    async fn delete(&self, id: i64) -> AccountResult<bool> {
        let mut state = self.inner.lock().unwrap();
        let before = state.accounts.len();
        state.accounts.retain(|a| a.id != id);
        Ok(state.accounts.len() < before)
    }
}

// ============================================================================
// Helpers
// ============================================================================

// Low bcrypt cost keeps the suite fast without changing semantics
fn test_config() -> AuthConfig {
    AuthConfig {
        bcrypt_cost: 4,
        ..AuthConfig::with_secret(b"test-secret".to_vec())
    }
}

fn service(repo: &MemoryAccountRepository, config: &AuthConfig) -> AccountService<MemoryAccountRepository> {
    AccountService::new(Arc::new(repo.clone()), Arc::new(config.clone()))
}

async fn create_account(
    repo: &MemoryAccountRepository,
    config: &AuthConfig,
    username: &str,
    password: &str,
) -> Account {
    service(repo, config)
        .create(CreateAccountInput {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: password.to_string(),
        })
        .await
        .unwrap()
}

async fn login(
    repo: &MemoryAccountRepository,
    config: &AuthConfig,
    username: &str,
    password: &str,
) -> AccountResult<String> {
    let use_case = LoginUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
    let output = use_case
        .execute(LoginInput {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await?;
    Ok(output.access_token)
}

// ============================================================================
// Auth flow
// ============================================================================

mod auth_flow {
    use super::*;

    #[tokio::test]
    async fn login_returns_token_with_account_subject() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        let alice = create_account(&repo, &config, "alice", "secret1").await;

        let token = login(&repo, &config, "alice", "secret1").await.unwrap();

        let claims = TokenIssuer::from_config(&config).verify(&token).unwrap();
        assert_eq!(claims.sub, alice.id);
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn login_unknown_username_fails() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        create_account(&repo, &config, "alice", "secret1").await;

        let result = login(&repo, &config, "nobody", "secret1").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_wrong_password_fails() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        create_account(&repo, &config, "alice", "secret1").await;

        let result = login(&repo, &config, "alice", "wrong-password").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn authorize_resolves_current_account() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        let alice = create_account(&repo, &config, "alice", "secret1").await;
        let token = login(&repo, &config, "alice", "secret1").await.unwrap();

        let use_case = AuthorizeUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
        let resolved = use_case.execute(&token).await.unwrap();
        assert_eq!(resolved.id, alice.id);
    }

    #[tokio::test]
    async fn authorize_rejects_token_for_deleted_account() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        let alice = create_account(&repo, &config, "alice", "secret1").await;
        let token = login(&repo, &config, "alice", "secret1").await.unwrap();

        service(&repo, &config).delete(alice.id).await.unwrap();

        let use_case = AuthorizeUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
        assert!(matches!(
            use_case.execute(&token).await,
            Err(AccountError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn authorize_rejects_garbage() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();

        let use_case = AuthorizeUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
        assert!(matches!(
            use_case.execute("definitely-not-a-token").await,
            Err(AccountError::InvalidToken)
        ));
    }
}

// ============================================================================
// Account service
// ============================================================================

mod account_service {
    use super::*;

    #[tokio::test]
    async fn create_rejects_invalid_email() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();

        let result = service(&repo, &config)
            .create(CreateAccountInput {
                username: "alice".to_string(),
                email: "not-an-email".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AccountError::Validation(_))));
    }

    #[tokio::test]
    async fn create_rejects_short_password() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();

        let result = service(&repo, &config)
            .create(CreateAccountInput {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "short".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AccountError::Validation(_))));
    }

    #[tokio::test]
    async fn create_stores_hash_not_plaintext() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();

        let account = create_account(&repo, &config, "alice", "secret1").await;
        assert_ne!(account.password_hash.as_str(), "secret1");
        assert!(!account.password_hash.as_str().contains("secret1"));
    }

    #[tokio::test]
    async fn pagination_returns_second_window_in_insertion_order() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        for index in 1..=25 {
            create_account(&repo, &config, &format!("user{index}"), "password123").await;
        }

        let page = service(&repo, &config).list(10, 2).await.unwrap();

        let ids: Vec<i64> = page.iter().map(|a| a.id).collect();
        assert_eq!(ids, (11..=20).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn pagination_falls_back_to_defaults() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        for index in 1..=15 {
            create_account(&repo, &config, &format!("user{index}"), "password123").await;
        }

        let page = service(&repo, &config).list(0, -3).await.unwrap();

        let ids: Vec<i64> = page.iter().map(|a| a.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        let alice = create_account(&repo, &config, "alice", "secret1").await;

        let updated = service(&repo, &config)
            .update(
                alice.id,
                UpdateAccountInput {
                    email: Some("new@example.com".to_string()),
                    profile_description: Some("hello".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username.as_str(), "alice");
        assert_eq!(updated.email.as_str(), "new@example.com");
        assert_eq!(updated.profile_description.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn update_missing_id_reports_not_found() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();

        let result = service(&repo, &config)
            .update(
                999,
                UpdateAccountInput {
                    email: Some("new@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AccountError::NotFound)));
    }

    #[tokio::test]
    async fn delete_missing_id_reports_not_found() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        let alice = create_account(&repo, &config, "alice", "secret1").await;

        service(&repo, &config).delete(alice.id).await.unwrap();

        let result = service(&repo, &config).delete(alice.id).await;
        assert!(matches!(result, Err(AccountError::NotFound)));
    }

    #[tokio::test]
    async fn lookup_miss_is_a_normal_none() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();

        assert!(service(&repo, &config).get_by_id(42).await.unwrap().is_none());
        assert!(
            service(&repo, &config)
                .get_by_username("nobody")
                .await
                .unwrap()
                .is_none()
        );
    }
}

// ============================================================================
// Seeding
// ============================================================================

mod seeding {
    use super::*;

    #[tokio::test]
    async fn seeds_placeholder_accounts_into_empty_store() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();

        let seeder = SeedUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
        assert_eq!(seeder.execute().await.unwrap(), SEED_ACCOUNT_COUNT);

        let all = service(&repo, &config).list(100, 1).await.unwrap();
        assert_eq!(all.len() as u64, SEED_ACCOUNT_COUNT);
        assert_eq!(all[0].username.as_str(), "user1");
    }

    #[tokio::test]
    async fn seeding_skips_populated_store() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        create_account(&repo, &config, "alice", "secret1").await;

        let seeder = SeedUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
        assert_eq!(seeder.execute().await.unwrap(), 0);

        let all = service(&repo, &config).list(100, 1).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn seeded_account_can_login() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();

        let seeder = SeedUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
        seeder.execute().await.unwrap();

        assert!(login(&repo, &config, "user1", "password123").await.is_ok());
        assert!(login(&repo, &config, "user1", "wrong").await.is_err());
    }
}

// ============================================================================
// HTTP surface
// ============================================================================

mod http_api {
    use super::*;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::presentation::router::{accounts_router_generic, auth_router_generic};

    fn test_app(repo: MemoryAccountRepository, config: AuthConfig) -> Router {
        Router::new()
            .nest("/auth", auth_router_generic(repo.clone(), config.clone()))
            .nest("/usuarios", accounts_router_generic(repo, config))
    }

    fn json_request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn full_scenario_login_then_protected_access() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        create_account(&repo, &config, "alice", "secret1").await;
        let app = test_app(repo, config);

        // Wrong password is rejected
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/login",
                None,
                Some(&serde_json::json!({"username": "alice", "password": "wrong"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Correct credentials return a token
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/login",
                None,
                Some(&serde_json::json!({"username": "alice", "password": "secret1"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        let token = body["access_token"].as_str().unwrap().to_string();

        // No token: unauthorized
        let response = app
            .clone()
            .oneshot(json_request("GET", "/usuarios", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Corrupted token: unauthorized
        let mut corrupted = token.clone();
        let last = corrupted.pop().unwrap();
        corrupted.push(if last == 'A' { 'B' } else { 'A' });
        let response = app
            .clone()
            .oneshot(json_request("GET", "/usuarios", Some(&corrupted), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Valid token: the page comes back
        let response = app
            .clone()
            .oneshot(json_request("GET", "/usuarios", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn created_account_response_has_no_password_hash() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        create_account(&repo, &config, "alice", "secret1").await;
        let app = test_app(repo, config.clone());

        let token = {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/auth/login",
                    None,
                    Some(&serde_json::json!({"username": "alice", "password": "secret1"})),
                ))
                .await
                .unwrap();
            response_json(response).await["access_token"]
                .as_str()
                .unwrap()
                .to_string()
        };

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/usuarios",
                Some(&token),
                Some(&serde_json::json!({
                    "username": "bob",
                    "email": "bob@example.com",
                    "password": "hunter22"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = response_json(response).await;
        assert_eq!(body["username"], "bob");
        assert_eq!(body["email"], "bob@example.com");
        let object = body.as_object().unwrap();
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("password_hash"));
    }

    #[tokio::test]
    async fn crud_roundtrip_over_http() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        let alice = create_account(&repo, &config, "alice", "secret1").await;
        let app = test_app(repo, config);

        let token = {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/auth/login",
                    None,
                    Some(&serde_json::json!({"username": "alice", "password": "secret1"})),
                ))
                .await
                .unwrap();
            response_json(response).await["access_token"]
                .as_str()
                .unwrap()
                .to_string()
        };

        // Read
        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("/usuarios/{}", alice.id),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Partial update
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/usuarios/{}", alice.id),
                Some(&token),
                Some(&serde_json::json!({"profileDescription": "hello"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["profileDescription"], "hello");
        assert_eq!(body["username"], "alice");

        // Missing record is a 404
        let response = app
            .clone()
            .oneshot(json_request("GET", "/usuarios/999", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Delete, then the record is gone
        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!("/usuarios/{}", alice.id),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!("/usuarios/{}", alice.id),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_with_invalid_email_is_bad_request() {
        let repo = MemoryAccountRepository::default();
        let config = test_config();
        create_account(&repo, &config, "alice", "secret1").await;
        let app = test_app(repo, config);

        let token = {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/auth/login",
                    None,
                    Some(&serde_json::json!({"username": "alice", "password": "secret1"})),
                ))
                .await
                .unwrap();
            response_json(response).await["access_token"]
                .as_str()
                .unwrap()
                .to_string()
        };

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/usuarios",
                Some(&token),
                Some(&serde_json::json!({
                    "username": "bob",
                    "email": "not-an-email",
                    "password": "hunter22"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
