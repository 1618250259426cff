//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::middleware::AuthenticatedUser;

use crate::application::config::CourseConfig;
use crate::application::{
    EnrollInput, EnrollUseCase, GetCourseUseCase, ListEnrolledUseCase, MarkConceptUseCase,
    StatsUseCase, UnenrollUseCase,
};
use crate::error::CourseResult;
use crate::presentation::dto::{
    CourseResponse, EnrollRequest, EnrolledCoursesResponse, EnrollmentListResponse,
    MarkConceptRequest, ProgressResponse, StatsResponse,
};

/// Shared state for course handlers
#[derive(Clone)]
pub struct CourseAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CourseConfig>,
}

/// POST /api/courses/enroll
pub async fn enroll<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<EnrollRequest>,
) -> CourseResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = EnrollUseCase::new(state.repo.clone(), state.config.clone());

    let input = EnrollInput {
        course_id: req.course_id,
        course_name: req.course_name,
        course_icon: req.course_icon,
    };

    let enrolled_courses = use_case.execute(&user.user_id, input).await?;

    Ok(Json(EnrollmentListResponse {
        success: true,
        message: "Successfully enrolled in course".to_string(),
        enrolled_courses,
    }))
}

/// GET /api/courses/enrolled
pub async fn enrolled<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> CourseResult<Json<EnrolledCoursesResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListEnrolledUseCase::new(state.repo.clone());
    let enrolled_courses = use_case.execute(&user.user_id).await?;

    Ok(Json(EnrolledCoursesResponse {
        success: true,
        total_enrolled: enrolled_courses.len(),
        enrolled_courses,
    }))
}

/// GET /api/courses/stats
pub async fn stats<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> CourseResult<Json<StatsResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = StatsUseCase::new(state.repo.clone());
    let stats = use_case.execute(&user.user_id).await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}

/// GET /api/courses/{course_id}
pub async fn get_course<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(course_id): Path<String>,
) -> CourseResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetCourseUseCase::new(state.repo.clone());
    let course = use_case.execute(&user.user_id, &course_id).await?;

    // Not being enrolled is reported in the body; the 404 status is
    // kept for client compatibility
    let response = match course {
        Some(course) => Json(CourseResponse {
            success: true,
            message: None,
            enrolled: true,
            course: Some(course),
        })
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(CourseResponse {
                success: false,
                message: Some("Course not found in enrolled courses".to_string()),
                enrolled: false,
                course: None,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

/// PUT /api/courses/{course_id}/progress
pub async fn mark_concept<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(course_id): Path<String>,
    Json(req): Json<MarkConceptRequest>,
) -> CourseResult<Json<ProgressResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = MarkConceptUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(&user.user_id, &course_id, &req.concept_id, req.completed)
        .await?;

    Ok(Json(ProgressResponse {
        success: true,
        message: "Progress updated successfully".to_string(),
        course: output.enrollment,
        points: output.points,
    }))
}

/// DELETE /api/courses/{course_id}/unenroll
pub async fn unenroll<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(course_id): Path<String>,
) -> CourseResult<Json<EnrollmentListResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = UnenrollUseCase::new(state.repo.clone());
    let enrolled_courses = use_case.execute(&user.user_id, &course_id).await?;

    Ok(Json(EnrollmentListResponse {
        success: true,
        message: "Successfully unenrolled from course".to_string(),
        enrolled_courses,
    }))
}
