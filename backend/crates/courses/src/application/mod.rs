//! Application Layer - Use Cases

pub mod config;
pub mod enroll;
pub mod get_course;
pub mod list_enrolled;
pub mod mark_concept;
pub mod stats;
pub mod unenroll;

pub use enroll::{EnrollInput, EnrollUseCase};
pub use get_course::GetCourseUseCase;
pub use list_enrolled::ListEnrolledUseCase;
pub use mark_concept::{MarkConceptOutput, MarkConceptUseCase};
pub use stats::{CourseStats, StatsUseCase};
pub use unenroll::UnenrollUseCase;
