//! Update Profile Use Case
//!
//! Updates the user's display name, avatar and/or password. Omitted
//! fields keep their previous value.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::MAX_UPDATE_RETRIES;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Update profile input
#[derive(Debug, Clone)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AuthResult<User> {
        // Validate and hash once, outside the retry loop
        let name = input.name.map(UserName::new).transpose()?;
        let password_hash = match input.password {
            Some(password) => Some(ClearTextPassword::new(password)?.hash(self.config.pepper())?),
            None => None,
        };

        for _ in 0..MAX_UPDATE_RETRIES {
            let mut user = self
                .repo
                .find_by_id(user_id)
                .await?
                .ok_or(AuthError::UserNotFound)?;

            if let Some(name) = name.clone() {
                user.set_name(name);
            }
            if let Some(avatar) = input.avatar.clone() {
                user.set_avatar(avatar);
            }
            if let Some(hash) = password_hash.clone() {
                user.set_password(hash);
            }

            match self.repo.update(&user).await {
                Ok(()) => {
                    tracing::info!(user_id = %user.user_id, "Profile updated");
                    return Ok(user);
                }
                Err(AuthError::VersionConflict) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AuthError::VersionConflict)
    }
}
