//! Enrollment Entity
//!
//! A course enrollment embedded in the user aggregate. The serde shape
//! doubles as the JSONB storage format and the API response format, so
//! the field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Enrollment status, derived from the completed-concept set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::NotStarted => "not_started",
            EnrollmentStatus::InProgress => "in_progress",
            EnrollmentStatus::Completed => "completed",
        }
    }
}

/// A single course enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub course_id: String,
    pub course_name: String,
    pub course_icon: String,
    pub enrolled_at: DateTime<Utc>,
    /// Completion percentage (0-100), recalculated on every change
    pub progress: u8,
    pub status: EnrollmentStatus,
    /// Concept IDs the user has completed in this course
    pub completed_concepts: Vec<String>,
    /// Clients expect "lastAccessed", not "lastAccessedAt"
    #[serde(rename = "lastAccessed")]
    pub last_accessed_at: DateTime<Utc>,
}

impl Enrollment {
    /// Create a fresh enrollment with no progress
    pub fn new(
        course_id: impl Into<String>,
        course_name: impl Into<String>,
        course_icon: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            course_icon: course_icon.into(),
            enrolled_at: now,
            progress: 0,
            status: EnrollmentStatus::NotStarted,
            completed_concepts: Vec::new(),
            last_accessed_at: now,
        }
    }

    /// Whether the concept is already completed
    pub fn has_concept(&self, concept_id: &str) -> bool {
        self.completed_concepts.iter().any(|c| c == concept_id)
    }

    /// Record a completed concept
    ///
    /// Returns true when the concept was newly added, false when it was
    /// already in the set (the call is idempotent).
    pub fn add_concept(&mut self, concept_id: &str) -> bool {
        self.touch();

        if self.has_concept(concept_id) {
            return false;
        }

        self.completed_concepts.push(concept_id.to_string());
        true
    }

    /// Remove a concept from the completed set
    ///
    /// Returns true when the concept was present. Removing an absent
    /// concept is a no-op.
    pub fn remove_concept(&mut self, concept_id: &str) -> bool {
        self.touch();

        let before = self.completed_concepts.len();
        self.completed_concepts.retain(|c| c != concept_id);
        self.completed_concepts.len() < before
    }

    /// Update the last-accessed timestamp
    pub fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enrollment_has_no_progress() {
        let enrollment = Enrollment::new("rust-basics", "Rust Basics", "🦀");
        assert_eq!(enrollment.progress, 0);
        assert_eq!(enrollment.status, EnrollmentStatus::NotStarted);
        assert!(enrollment.completed_concepts.is_empty());
    }

    #[test]
    fn test_add_concept_is_idempotent() {
        let mut enrollment = Enrollment::new("rust-basics", "Rust Basics", "🦀");
        assert!(enrollment.add_concept("ownership"));
        assert!(!enrollment.add_concept("ownership"));
        assert_eq!(enrollment.completed_concepts.len(), 1);
    }

    #[test]
    fn test_remove_concept() {
        let mut enrollment = Enrollment::new("rust-basics", "Rust Basics", "🦀");
        enrollment.add_concept("ownership");

        assert!(enrollment.remove_concept("ownership"));
        assert!(enrollment.completed_concepts.is_empty());
        assert!(!enrollment.remove_concept("ownership"));
    }

    #[test]
    fn test_serde_shape_is_camel_case() {
        let enrollment = Enrollment::new("rust-basics", "Rust Basics", "🦀");
        let json = serde_json::to_value(&enrollment).unwrap();

        assert_eq!(json["courseId"], "rust-basics");
        assert_eq!(json["status"], "not_started");
        assert!(json["completedConcepts"].is_array());
        assert!(json.get("lastAccessed").is_some());
        assert!(json.get("lastAccessedAt").is_none());
        assert!(json.get("course_id").is_none());
    }
}
