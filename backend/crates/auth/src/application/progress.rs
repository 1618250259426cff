//! Update Progress Use Case
//!
//! Updates the flat per-concept progress map on the user profile.
//! Marking a concept completed awards points on every call; the
//! course-scoped endpoints are the idempotent path.

use std::sync::Arc;

use crate::application::MAX_UPDATE_RETRIES;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Points awarded per completed concept
pub const POINTS_PER_CONCEPT: i64 = 50;

/// Update progress input
#[derive(Debug, Clone)]
pub struct UpdateProgressInput {
    pub concept_key: String,
    pub completed: bool,
}

/// Update progress use case
pub struct UpdateProgressUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProgressUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProgressInput) -> AuthResult<User> {
        if input.concept_key.trim().is_empty() {
            return Err(AuthError::Validation("Concept key is required".to_string()));
        }

        for _ in 0..MAX_UPDATE_RETRIES {
            let mut user = self
                .repo
                .find_by_id(user_id)
                .await?
                .ok_or(AuthError::UserNotFound)?;

            user.record_concept_progress(&input.concept_key, input.completed);

            if input.completed {
                user.award_points(POINTS_PER_CONCEPT);
            }

            match self.repo.update(&user).await {
                Ok(()) => {
                    tracing::info!(
                        user_id = %user.user_id,
                        concept_key = %input.concept_key,
                        completed = input.completed,
                        "Progress updated"
                    );
                    return Ok(user);
                }
                Err(AuthError::VersionConflict) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AuthError::VersionConflict)
    }
}
