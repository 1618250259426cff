//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use assist::{AssistConfig, assist_router};
use auth::{AuthConfig, PgUserRepository, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, StatusCode, header},
    middleware,
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use courses::{CourseConfig, courses_router};
use platform::rate_limit::{RateLimitConfig, RateLimitState, rate_limit_middleware};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Decode the base64 session secret, requiring exactly 32 bytes
fn parse_session_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let secret_bytes = Engine::decode(&general_purpose::STANDARD, secret_b64)?;

    <[u8; 32]>::try_from(secret_bytes.as_slice()).map_err(|_| {
        anyhow::anyhow!(
            "SESSION_SECRET must decode to exactly 32 bytes, got {}",
            secret_bytes.len()
        )
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,courses=info,assist=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        AuthConfig {
            session_secret: parse_session_secret(&secret_b64)?,
            password_pepper: env::var("PASSWORD_PEPPER").ok().map(|p| p.into_bytes()),
            ..AuthConfig::default()
        }
    };
    let auth_config_shared = Arc::new(auth_config.clone());

    // Assist configuration
    let assist_config = AssistConfig {
        api_key: env::var("NEBIUS_API_KEY").ok(),
        ..AssistConfig::default()
    };
    let has_api_key = assist_config.is_configured();

    if !has_api_key {
        tracing::warn!("NEBIUS_API_KEY not set; AI endpoints will return 503");
    }

    // Rate limiting (per IP, fixed window)
    let rate_limit = RateLimitState::new(RateLimitConfig::default());

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

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
    let started_at = Instant::now();
    let repo = PgUserRepository::new(pool.clone());

    let app = Router::new()
        .route(
            "/api/health",
            get(move || async move {
                Json(json!({
                    "status": "healthy",
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "hasApiKey": has_api_key,
                    "uptime": started_at.elapsed().as_secs(),
                }))
            }),
        )
        .nest("/api/auth", auth_router(repo.clone(), auth_config))
        .nest(
            "/api/courses",
            courses_router(repo, CourseConfig::default(), auth_config_shared),
        )
        .nest("/api", assist_router(assist_config))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"success": false, "message": "Route not found"})),
            )
        })
        .layer(middleware::from_fn_with_state(
            rate_limit,
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
