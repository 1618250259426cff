//! Courses Backend Module
//!
//! Course enrollment and per-course concept progress on top of the
//! user aggregate owned by the auth crate.
//!
//! Clean Architecture structure:
//! - `domain/` - Progress tracking rules
//! - `application/` - Use cases
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;


// Re-exports for convenience
pub use application::config::CourseConfig;
pub use error::{CourseError, CourseResult};
pub use presentation::router::courses_router;

pub mod config {
    pub use crate::application::config::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
