//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_session;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: config.clone(),
    };

    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R>))
        .route("/me", get(handlers::me::<R>))
        .route("/profile", put(handlers::update_profile::<R>))
        .route("/progress", put(handlers::update_progress::<R>))
        .route_layer(middleware::from_fn_with_state(config, require_session));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::application::session::generate_session_token;
    use crate::domain::value_object::user_id::UserId;
    use crate::tests::MemoryUserRepository;

    fn test_router() -> (Router, AuthConfig) {
        let config = AuthConfig::with_random_secret();
        let router = auth_router_generic(MemoryUserRepository::new(), config.clone());
        (router, config)
    }

    #[tokio::test]
    async fn test_logout_requires_session() {
        let (router, _) = test_router();

        let response = router
            .oneshot(
                Request::post("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_clears_cookie_for_valid_session() {
        let (router, config) = test_router();
        let token = generate_session_token(&config, &UserId::new());

        let response = router
            .oneshot(
                Request::post("/logout")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(set_cookie.starts_with(&format!("{}=", config.session_cookie_name)));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
