//! Unenroll Use Case
//!
//! Removes a course enrollment and returns the remaining list.
//! Unenrolling from a course the user is not enrolled in succeeds
//! quietly; earned points are kept either way.

use std::sync::Arc;

use auth::AuthError;
use auth::application::MAX_UPDATE_RETRIES;
use auth::domain::repository::UserRepository;
use auth::models::enrollment::Enrollment;
use auth::models::user_id::UserId;

use crate::error::{CourseError, CourseResult};

/// Unenroll use case
pub struct UnenrollUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UnenrollUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        course_id: &str,
    ) -> CourseResult<Vec<Enrollment>> {
        for _ in 0..MAX_UPDATE_RETRIES {
            let mut user = self
                .repo
                .find_by_id(user_id)
                .await
                .map_err(CourseError::Auth)?
                .ok_or(CourseError::Auth(AuthError::UserNotFound))?;

            if !user.unenroll(course_id) {
                // Nothing to remove, nothing to persist
                return Ok(user.enrollments);
            }

            match self.repo.update(&user).await {
                Ok(()) => {
                    tracing::info!(
                        user_id = %user.user_id,
                        course_id = %course_id,
                        "User unenrolled from course"
                    );
                    return Ok(user.enrollments);
                }
                Err(AuthError::VersionConflict) => continue,
                Err(e) => return Err(CourseError::Auth(e)),
            }
        }

        Err(CourseError::Auth(AuthError::VersionConflict))
    }
}
