//! Course Error Types

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Course-specific result type alias
pub type CourseResult<T> = Result<T, CourseError>;

/// Course-specific error variants
#[derive(Debug, Error)]
pub enum CourseError {
    /// User is already enrolled in the course
    #[error("Already enrolled in this course")]
    AlreadyEnrolled,

    /// User is not enrolled in the course
    #[error("Course not found in enrolled courses")]
    NotEnrolled,

    /// Input validation error
    #[error("{0}")]
    Validation(String),

    /// Error from the auth crate (user lookup, persistence)
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl CourseError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CourseError::AlreadyEnrolled | CourseError::Validation(_) => StatusCode::BAD_REQUEST,
            CourseError::NotEnrolled => StatusCode::NOT_FOUND,
            CourseError::Auth(e) => e.status_code(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CourseError::AlreadyEnrolled | CourseError::Validation(_) => ErrorKind::BadRequest,
            CourseError::NotEnrolled => ErrorKind::NotFound,
            CourseError::Auth(e) => e.kind(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }
}

impl IntoResponse for CourseError {
    fn into_response(self) -> Response {
        match self {
            // Auth errors keep their own logging
            CourseError::Auth(e) => e.into_response(),
            other => {
                tracing::debug!(error = %other, "Course error");
                other.to_app_error().into_response()
            }
        }
    }
}
