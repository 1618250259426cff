//! List Enrolled Use Case
//!
//! Lists all of the current user's enrollments.

use std::sync::Arc;

use auth::AuthError;
use auth::domain::repository::UserRepository;
use auth::models::enrollment::Enrollment;
use auth::models::user_id::UserId;

use crate::error::{CourseError, CourseResult};

/// List enrolled courses use case
pub struct ListEnrolledUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ListEnrolledUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> CourseResult<Vec<Enrollment>> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await
            .map_err(CourseError::Auth)?
            .ok_or(CourseError::Auth(AuthError::UserNotFound))?;

        Ok(user.enrollments)
    }
}
