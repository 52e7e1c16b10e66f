//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are handled by
//! the `accounts` crate and render as problem-details JSON.

use accounts::{AuthConfig, PgAccountRepository, SeedUseCase, accounts_router, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,accounts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url_from_env())
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token signing secret. Release builds refuse to start without one;
    // debug builds fall back to a random per-process secret, which means
    // tokens do not survive a restart.
    let config = if cfg!(debug_assertions) {
        match env::var("TOKEN_SECRET") {
            Ok(secret) => AuthConfig::with_secret(secret.into_bytes()),
            Err(_) => AuthConfig::with_random_secret(),
        }
    } else {
        let secret = env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in production");
        AuthConfig::with_secret(secret.into_bytes())
    };

    let repo = PgAccountRepository::new(pool.clone());

    // Startup seeding: populate an empty store with placeholder accounts.
    // Errors here should not prevent server startup
    let seeder = SeedUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
    match seeder.execute().await {
        Ok(created) if created > 0 => {
            tracing::info!(accounts_created = created, "Account seeding completed");
        }
        Ok(_) => {
            tracing::info!("Accounts already present, seeding skipped");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Account seeding failed, continuing anyway");
        }
    }

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/auth", auth_router(repo.clone(), config.clone()))
        .nest("/usuarios", accounts_router(repo, config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the connection URL from the discrete environment variables
fn database_url_from_env() -> String {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(5432);
    let user = env::var("POSTGRES_USER").unwrap_or_else(|_| "user".to_string());
    let password = env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "password".to_string());
    let database = env::var("POSTGRES_DB").unwrap_or_else(|_| "postgres".to_string());

    format!("postgres://{user}:{password}@{host}:{port}/{database}")
}
