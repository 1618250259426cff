//! Courses Router
//!
//! Every course route requires a valid session, so the whole router is
//! wrapped in the auth middleware.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use auth::AuthConfig;
use auth::domain::repository::UserRepository;
use auth::infra::postgres::PgUserRepository;
use auth::middleware::require_session;

use crate::application::config::CourseConfig;
use crate::presentation::handlers::{self, CourseAppState};

/// Create the Courses router with PostgreSQL repository
pub fn courses_router(
    repo: PgUserRepository,
    config: CourseConfig,
    auth_config: Arc<AuthConfig>,
) -> Router {
    courses_router_generic(repo, config, auth_config)
}

/// Create a generic Courses router for any repository implementation
pub fn courses_router_generic<R>(
    repo: R,
    config: CourseConfig,
    auth_config: Arc<AuthConfig>,
) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = CourseAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/enroll", post(handlers::enroll::<R>))
        .route("/enrolled", get(handlers::enrolled::<R>))
        .route("/stats", get(handlers::stats::<R>))
        .route("/{course_id}", get(handlers::get_course::<R>))
        .route("/{course_id}/progress", put(handlers::mark_concept::<R>))
        .route("/{course_id}/unenroll", delete(handlers::unenroll::<R>))
        .route_layer(middleware::from_fn_with_state(auth_config, require_session))
        .with_state(state)
}
