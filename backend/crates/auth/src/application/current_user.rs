//! Current User Use Case
//!
//! Resolves a session token to the full user aggregate.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{SessionClaims, verify_session_token};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Current user use case
pub struct CurrentUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Verify a token without touching the database
    pub fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        verify_session_token(&self.config, token).ok_or(AuthError::SessionInvalid)
    }

    /// Load the user behind a verified token
    ///
    /// A valid token for a deleted user yields 404, not 401.
    pub async fn execute(&self, token: &str) -> AuthResult<User> {
        let claims = self.verify(token)?;
        self.load(&claims.user_id).await
    }

    /// Load a user by ID (for handlers that already went through the
    /// auth middleware)
    pub async fn load(&self, user_id: &UserId) -> AuthResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
