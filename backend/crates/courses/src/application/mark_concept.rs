//! Mark Concept Use Case
//!
//! Records a concept as completed (or not) in a course enrollment.
//! Idempotent: marking the same concept twice awards points once, and
//! un-marking never claws points back.

use std::sync::Arc;

use auth::AuthError;
use auth::application::MAX_UPDATE_RETRIES;
use auth::domain::repository::UserRepository;
use auth::models::enrollment::Enrollment;
use auth::models::user_id::UserId;

use crate::application::config::CourseConfig;
use crate::domain::tracker;
use crate::error::{CourseError, CourseResult};

/// Mark concept output
pub struct MarkConceptOutput {
    pub enrollment: Enrollment,
    /// User's total points after the update
    pub points: i64,
}

/// Mark concept use case
pub struct MarkConceptUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<CourseConfig>,
}

impl<R> MarkConceptUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CourseConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        course_id: &str,
        concept_id: &str,
        completed: bool,
    ) -> CourseResult<MarkConceptOutput> {
        if concept_id.trim().is_empty() {
            return Err(CourseError::Validation(
                "Concept ID is required".to_string(),
            ));
        }

        for _ in 0..MAX_UPDATE_RETRIES {
            let mut user = self
                .repo
                .find_by_id(user_id)
                .await
                .map_err(CourseError::Auth)?
                .ok_or(CourseError::Auth(AuthError::UserNotFound))?;

            let total_concepts = self.config.total_concepts;
            let points_per_concept = self.config.points_per_concept;

            let enrollment = user
                .enrollment_mut(course_id)
                .ok_or(CourseError::NotEnrolled)?;

            let newly_completed = if completed {
                enrollment.add_concept(concept_id)
            } else {
                enrollment.remove_concept(concept_id);
                false
            };
            tracker::apply(enrollment, total_concepts);
            let snapshot = enrollment.clone();

            user.mirror_course_concept(course_id, concept_id, completed);
            if newly_completed {
                user.award_points(points_per_concept);
            }

            match self.repo.update(&user).await {
                Ok(()) => {
                    tracing::info!(
                        user_id = %user.user_id,
                        course_id = %course_id,
                        concept_id = %concept_id,
                        completed,
                        newly_completed,
                        progress = snapshot.progress,
                        "Course progress updated"
                    );
                    return Ok(MarkConceptOutput {
                        enrollment: snapshot,
                        points: user.points,
                    });
                }
                Err(AuthError::VersionConflict) => continue,
                Err(e) => return Err(CourseError::Auth(e)),
            }
        }

        Err(CourseError::Auth(AuthError::VersionConflict))
    }
}
