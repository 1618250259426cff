//! Assist Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Assist-specific result type alias
pub type AssistResult<T> = Result<T, AssistError>;

/// Assist-specific error variants
#[derive(Debug, Error)]
pub enum AssistError {
    /// No API key configured
    #[error("AI service is not configured")]
    NotConfigured,

    /// Input validation error
    #[error("{0}")]
    Validation(String),

    /// Upstream API returned an error or an unusable body
    #[error("Failed to get AI response")]
    Upstream(String),

    /// Transport-level failure talking to the upstream API
    #[error("Failed to get AI response")]
    Transport(#[from] reqwest::Error),
}

impl AssistError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssistError::NotConfigured => ErrorKind::ServiceUnavailable,
            AssistError::Validation(_) => ErrorKind::BadRequest,
            AssistError::Upstream(_) | AssistError::Transport(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            AssistError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Upstream AI error");
            }
            AssistError::Transport(e) => {
                tracing::error!(error = %e, "AI transport error");
            }
            AssistError::NotConfigured => {
                tracing::warn!("AI endpoint hit without API key configured");
            }
            AssistError::Validation(_) => {
                tracing::debug!(error = %self, "Assist validation error");
            }
        }
    }
}

impl IntoResponse for AssistError {
    fn into_response(self) -> Response {
        self.log();
        AppError::new(self.kind(), self.to_string()).into_response()
    }
}
