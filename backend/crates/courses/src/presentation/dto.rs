//! API DTOs (Data Transfer Objects)

use auth::models::enrollment::Enrollment;
use serde::{Deserialize, Serialize};

use crate::application::stats::CourseStats;

// ============================================================================
// Requests
// ============================================================================

/// Enroll request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub course_id: String,
    pub course_name: String,
    pub course_icon: Option<String>,
}

/// Mark concept request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkConceptRequest {
    pub concept_id: String,
    /// false un-marks the concept without clawing back points
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

// ============================================================================
// Responses
// ============================================================================

/// Enroll/unenroll response carrying the updated enrollment list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentListResponse {
    pub success: bool,
    pub message: String,
    pub enrolled_courses: Vec<Enrollment>,
}

/// Enrolled courses response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCoursesResponse {
    pub success: bool,
    pub enrolled_courses: Vec<Enrollment>,
    pub total_enrolled: usize,
}

/// Single course response
///
/// Not being enrolled is reported in the shape, not just the status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub enrolled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Enrollment>,
}

/// Stats response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub stats: CourseStats,
}

/// Progress update response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub success: bool,
    pub message: String,
    pub course: Enrollment,
    /// User's total points after the update
    pub points: i64,
}
