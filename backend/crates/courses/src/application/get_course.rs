//! Get Course Use Case
//!
//! Fetches a single enrollment for the current user. Not being
//! enrolled is a normal outcome here, not an error.

use std::sync::Arc;

use auth::AuthError;
use auth::domain::repository::UserRepository;
use auth::models::enrollment::Enrollment;
use auth::models::user_id::UserId;

use crate::error::{CourseError, CourseResult};

/// Get course use case
pub struct GetCourseUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> GetCourseUseCase<R>
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
    ) -> CourseResult<Option<Enrollment>> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await
            .map_err(CourseError::Auth)?
            .ok_or(CourseError::Auth(AuthError::UserNotFound))?;

        Ok(user.enrollment(course_id).cloned())
    }
}
