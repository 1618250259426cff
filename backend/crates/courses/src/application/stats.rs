//! Stats Use Case
//!
//! Aggregates enrollment and gamification stats for the current user.

use std::sync::Arc;

use auth::AuthError;
use auth::domain::repository::UserRepository;
use auth::models::enrollment::EnrollmentStatus;
use auth::models::user::User;
use auth::models::user_id::UserId;
use serde::Serialize;

use crate::error::{CourseError, CourseResult};

/// Aggregated learning stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStats {
    pub total_enrolled: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Sum of completed-concept counts across all courses
    pub total_concepts: usize,
    /// Mean of per-course progress, rounded; 0 with no enrollments
    pub average_progress: u8,
    pub points: i64,
    pub streak: i64,
}

impl CourseStats {
    /// Compute stats from the user aggregate
    pub fn from_user(user: &User) -> Self {
        let completed = user
            .enrollments
            .iter()
            .filter(|e| e.status == EnrollmentStatus::Completed)
            .count();
        let in_progress = user
            .enrollments
            .iter()
            .filter(|e| e.status == EnrollmentStatus::InProgress)
            .count();
        let concepts: usize = user
            .enrollments
            .iter()
            .map(|e| e.completed_concepts.len())
            .sum();
        let average = if user.enrollments.is_empty() {
            0
        } else {
            let sum: u32 = user.enrollments.iter().map(|e| u32::from(e.progress)).sum();
            (f64::from(sum) / user.enrollments.len() as f64).round() as u8
        };

        Self {
            total_enrolled: user.enrollments.len(),
            in_progress,
            completed,
            total_concepts: concepts,
            average_progress: average,
            points: user.points,
            streak: user.streak,
        }
    }
}

/// Stats use case
pub struct StatsUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> StatsUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> CourseResult<CourseStats> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await
            .map_err(CourseError::Auth)?
            .ok_or(CourseError::Auth(AuthError::UserNotFound))?;

        Ok(CourseStats::from_user(&user))
    }
}
