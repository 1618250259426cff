//! HTTP Handlers

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use platform::cookie::CookieConfig;

use crate::application::config::AuthConfig;
use crate::application::{
    CurrentUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdateProfileInput, UpdateProfileUseCase, UpdateProgressInput, UpdateProgressUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthUserDto, LoginRequest, MessageResponse, ProgressEnvelope, RegisterRequest, TokenResponse,
    UpdateProfileRequest, UpdateProgressRequest, UserDto, UserEnvelope,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        name: req.name,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    let cookie = build_session_cookie(&state.config, &output.session_token);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(TokenResponse {
            success: true,
            message: "User registered successfully".to_string(),
            token: output.session_token,
            user: AuthUserDto::from_user(&output.user),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    let cookie = build_session_cookie(&state.config, &output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(TokenResponse {
            success: true,
            message: "Login successful".to_string(),
            token: output.session_token,
            user: AuthUserDto::with_progress(&output.user),
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Tokens are stateless, so logging out just clears the cookie.
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = build_clear_cookie(&state.config);

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = CurrentUserUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.load(&auth.user_id).await?;

    Ok(Json(UserEnvelope {
        success: true,
        message: None,
        user: UserDto::from_user(&user),
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// PUT /api/auth/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone());

    let input = UpdateProfileInput {
        name: req.name,
        avatar: req.avatar,
        password: req.password,
    };

    let user = use_case.execute(&auth.user_id, input).await?;

    Ok(Json(UserEnvelope {
        success: true,
        message: Some("Profile updated successfully".to_string()),
        user: UserDto::from_user(&user),
    }))
}

// ============================================================================
// Flat Progress
// ============================================================================

/// PUT /api/auth/progress
pub async fn update_progress<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateProgressRequest>,
) -> AuthResult<Json<ProgressEnvelope>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProgressUseCase::new(state.repo.clone());

    let input = UpdateProgressInput {
        concept_key: req.concept_key,
        completed: req.completed,
    };

    let user = use_case.execute(&auth.user_id, input).await?;

    Ok(Json(ProgressEnvelope {
        success: true,
        message: "Progress updated".to_string(),
        progress: user.progress,
        points: user.points,
    }))
}

// ============================================================================
// Cookie Helpers
// ============================================================================

/// Build the session Set-Cookie header value
pub fn build_session_cookie(config: &AuthConfig, token: &str) -> String {
    let cookie_config = CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.session_ttl_secs()),
    };

    cookie_config.build_set_cookie(token)
}

/// Build the clearing Set-Cookie header value
pub fn build_clear_cookie(config: &AuthConfig) -> String {
    let cookie_config = CookieConfig {
        name: config.session_cookie_name.clone(),
        ..Default::default()
    };

    cookie_config.build_delete_cookie()
}
