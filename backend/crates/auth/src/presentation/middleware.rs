//! Auth Middleware
//!
//! Middleware for requiring a valid session token on protected routes.
//! Token verification is stateless, so the middleware only needs the
//! config; handlers re-fetch the user from the database.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::verify_session_token;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

/// Authenticated user identity stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub expires_at_ms: i64,
}

/// Extract the session token from the cookie or Authorization header
pub fn extract_token(headers: &axum::http::HeaderMap, config: &AuthConfig) -> Option<String> {
    platform::cookie::extract_cookie(headers, &config.session_cookie_name)
        .or_else(|| platform::client::extract_bearer_token(headers))
}

/// Middleware that requires a valid session token
///
/// On success, inserts [`AuthenticatedUser`] into request extensions.
pub async fn require_session(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token(req.headers(), &config) {
        Some(token) => token,
        None => {
            return Err(
                AppError::unauthorized("Not authorized, no token").into_response(),
            );
        }
    };

    let claims = match verify_session_token(&config, &token) {
        Some(claims) => claims,
        None => return Err(AuthError::SessionInvalid.into_response()),
    };

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
        expires_at_ms: claims.expires_at_ms,
    });

    Ok(next.run(req).await)
}
