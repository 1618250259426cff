//! Register Use Case
//!
//! Creates a new user account and issues a session token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session::generate_session_token;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
    pub session_token: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let name = UserName::new(input.name)?;
        let email = Email::new(input.email)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash(self.config.pepper())?;

        let user = User::new(name, email, password_hash, &self.config.default_avatar);

        // The unique index on email backstops the exists check; a race
        // surfaces as a database conflict here.
        self.repo.create(&user).await?;

        let session_token = generate_session_token(&self.config, &user.user_id);

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput {
            user,
            session_token,
        })
    }
}
