//! Progress Tracker
//!
//! Derives the stored progress percentage and status of an enrollment
//! from its completed-concept set. Both fields are recomputed on every
//! mutation, so removing a concept would also move the status backwards.

use auth::models::enrollment::{Enrollment, EnrollmentStatus};

/// Completion percentage, rounded to the nearest integer
///
/// Counts above the course total clamp to 100.
pub fn progress_percent(completed: usize, total_concepts: u32) -> u8 {
    if total_concepts == 0 {
        return 0;
    }

    let percent = (completed as f64 * 100.0 / total_concepts as f64).round();
    percent.min(100.0) as u8
}

/// Status derived from the completed-concept count
pub fn derive_status(completed: usize, total_concepts: u32) -> EnrollmentStatus {
    if completed == 0 {
        EnrollmentStatus::NotStarted
    } else if completed >= total_concepts as usize {
        EnrollmentStatus::Completed
    } else {
        EnrollmentStatus::InProgress
    }
}

/// Recompute the enrollment's stored progress and status
pub fn apply(enrollment: &mut Enrollment, total_concepts: u32) {
    let completed = enrollment.completed_concepts.len();
    enrollment.progress = progress_percent(completed, total_concepts);
    enrollment.status = derive_status(completed, total_concepts);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_rounds() {
        assert_eq!(progress_percent(0, 12), 0);
        assert_eq!(progress_percent(1, 12), 8); // 8.33 rounds down
        assert_eq!(progress_percent(2, 12), 17); // 16.67 rounds up
        assert_eq!(progress_percent(6, 12), 50);
        assert_eq!(progress_percent(11, 12), 92);
        assert_eq!(progress_percent(12, 12), 100);
    }

    #[test]
    fn test_progress_percent_clamps() {
        assert_eq!(progress_percent(15, 12), 100);
        assert_eq!(progress_percent(3, 0), 0);
    }

    #[test]
    fn test_status_transitions() {
        assert_eq!(derive_status(0, 12), EnrollmentStatus::NotStarted);
        assert_eq!(derive_status(1, 12), EnrollmentStatus::InProgress);
        assert_eq!(derive_status(11, 12), EnrollmentStatus::InProgress);
        assert_eq!(derive_status(12, 12), EnrollmentStatus::Completed);
    }

    #[test]
    fn test_apply_recomputes_both_fields() {
        let mut enrollment = Enrollment::new("rust-basics", "Rust Basics", "🦀");

        enrollment.add_concept("ownership");
        apply(&mut enrollment, 12);
        assert_eq!(enrollment.progress, 8);
        assert_eq!(enrollment.status, EnrollmentStatus::InProgress);

        // Status falls back when the set shrinks
        enrollment.completed_concepts.clear();
        apply(&mut enrollment, 12);
        assert_eq!(enrollment.progress, 0);
        assert_eq!(enrollment.status, EnrollmentStatus::NotStarted);
    }

    #[test]
    fn test_full_course_completes() {
        let mut enrollment = Enrollment::new("rust-basics", "Rust Basics", "🦀");
        for i in 0..12 {
            enrollment.add_concept(&format!("concept-{i}"));
        }

        apply(&mut enrollment, 12);
        assert_eq!(enrollment.progress, 100);
        assert_eq!(enrollment.status, EnrollmentStatus::Completed);
    }
}
