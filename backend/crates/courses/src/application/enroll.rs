//! Enroll Use Case
//!
//! Adds a course enrollment to the user aggregate and returns the
//! updated enrollment list.

use std::sync::Arc;

use auth::AuthError;
use auth::application::MAX_UPDATE_RETRIES;
use auth::domain::repository::UserRepository;
use auth::models::enrollment::Enrollment;
use auth::models::user_id::UserId;

use crate::application::config::CourseConfig;
use crate::error::{CourseError, CourseResult};

/// Enroll input
#[derive(Debug, Clone)]
pub struct EnrollInput {
    pub course_id: String,
    pub course_name: String,
    pub course_icon: Option<String>,
}

/// Enroll use case
pub struct EnrollUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<CourseConfig>,
}

impl<R> EnrollUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CourseConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: EnrollInput,
    ) -> CourseResult<Vec<Enrollment>> {
        if input.course_id.trim().is_empty() {
            return Err(CourseError::Validation("Course ID is required".to_string()));
        }
        if input.course_name.trim().is_empty() {
            return Err(CourseError::Validation(
                "Course name is required".to_string(),
            ));
        }

        let icon = input
            .course_icon
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or_else(|| self.config.default_icon.clone());

        for _ in 0..MAX_UPDATE_RETRIES {
            let mut user = self
                .repo
                .find_by_id(user_id)
                .await
                .map_err(CourseError::Auth)?
                .ok_or(CourseError::Auth(AuthError::UserNotFound))?;

            let enrollment = Enrollment::new(&input.course_id, &input.course_name, &icon);

            if !user.enroll(enrollment) {
                return Err(CourseError::AlreadyEnrolled);
            }

            match self.repo.update(&user).await {
                Ok(()) => {
                    tracing::info!(
                        user_id = %user.user_id,
                        course_id = %input.course_id,
                        "User enrolled in course"
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
