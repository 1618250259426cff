//! User Entity
//!
//! The user aggregate root. Learning progress and course enrollments
//! are embedded so that a single optimistic-lock version covers every
//! mutation of the user's state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::entity::enrollment::Enrollment;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
};

/// User aggregate
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: UserName,
    /// Email (unique, used for login)
    pub email: Email,
    /// Argon2id password hash
    pub password_hash: HashedPassword,
    /// Avatar URL
    pub avatar: String,
    /// Role (user or admin)
    pub role: UserRole,
    /// Gamification points
    pub points: i64,
    /// Daily streak counter
    pub streak: i64,
    /// Flat per-concept progress map
    ///
    /// Kept for the profile progress endpoint, which predates per-course
    /// enrollments. Values are plain booleans on the wire and in JSONB.
    pub progress: BTreeMap<String, bool>,
    /// Course enrollments
    pub enrollments: Vec<Enrollment>,
    /// Earned achievement IDs
    pub achievements: Vec<String>,
    /// Optimistic lock version (bumped by the repository on update)
    pub version: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        name: UserName,
        email: Email,
        password_hash: HashedPassword,
        avatar: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            avatar: avatar.into(),
            role: UserRole::default(),
            points: 0,
            streak: 0,
            progress: BTreeMap::new(),
            enrollments: Vec::new(),
            achievements: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update display name
    pub fn set_name(&mut self, name: UserName) {
        self.name = name;
        self.touch();
    }

    /// Update avatar URL
    pub fn set_avatar(&mut self, avatar: impl Into<String>) {
        self.avatar = avatar.into();
        self.touch();
    }

    /// Replace the password hash
    pub fn set_password(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
        self.touch();
    }

    /// Award gamification points
    pub fn award_points(&mut self, delta: i64) {
        self.points += delta;
        self.touch();
    }

    /// Record progress on a concept in the flat map
    ///
    /// Overwrites any previous entry for the concept. The caller decides
    /// whether points are awarded.
    pub fn record_concept_progress(&mut self, concept_id: impl Into<String>, completed: bool) {
        self.progress.insert(concept_id.into(), completed);
        self.touch();
    }

    /// Mirror a course concept into the flat progress map
    ///
    /// The flat map predates per-course enrollments; some clients still
    /// read it, so every course progress mutation goes through here.
    /// Set on completion, removed on un-completion.
    pub fn mirror_course_concept(&mut self, course_id: &str, concept_id: &str, completed: bool) {
        let key = format!("{course_id}_{concept_id}");

        if completed {
            self.record_concept_progress(key, true);
        } else {
            self.progress.remove(&key);
            self.touch();
        }
    }

    /// Add a course enrollment
    ///
    /// Returns false if the user is already enrolled in the course.
    pub fn enroll(&mut self, enrollment: Enrollment) -> bool {
        if self.enrollment(&enrollment.course_id).is_some() {
            return false;
        }

        self.enrollments.push(enrollment);
        self.touch();
        true
    }

    /// Remove a course enrollment
    ///
    /// Returns true if an enrollment was removed.
    pub fn unenroll(&mut self, course_id: &str) -> bool {
        let before = self.enrollments.len();
        self.enrollments.retain(|e| e.course_id != course_id);

        if self.enrollments.len() < before {
            self.touch();
            true
        } else {
            false
        }
    }

    /// Find an enrollment by course ID
    pub fn enrollment(&self, course_id: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.course_id == course_id)
    }

    /// Find an enrollment by course ID (mutable)
    pub fn enrollment_mut(&mut self, course_id: &str) -> Option<&mut Enrollment> {
        self.enrollments
            .iter_mut()
            .find(|e| e.course_id == course_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn test_user() -> User {
        let password = ClearTextPassword::new("secret1".to_string()).unwrap();
        User::new(
            UserName::new("Alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            password.hash(None).unwrap(),
            "https://via.placeholder.com/150",
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = test_user();
        assert_eq!(user.points, 0);
        assert_eq!(user.streak, 0);
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.version, 0);
        assert!(user.enrollments.is_empty());
        assert!(user.progress.is_empty());
    }

    #[test]
    fn test_enroll_rejects_duplicates() {
        let mut user = test_user();
        assert!(user.enroll(Enrollment::new("rust-basics", "Rust Basics", "🦀")));
        assert!(!user.enroll(Enrollment::new("rust-basics", "Rust Basics", "🦀")));
        assert_eq!(user.enrollments.len(), 1);
    }

    #[test]
    fn test_unenroll() {
        let mut user = test_user();
        user.enroll(Enrollment::new("rust-basics", "Rust Basics", "🦀"));

        assert!(user.unenroll("rust-basics"));
        assert!(user.enrollments.is_empty());
        assert!(!user.unenroll("rust-basics"));
    }

    #[test]
    fn test_record_concept_progress() {
        let mut user = test_user();
        user.record_concept_progress("ownership", true);
        assert_eq!(user.progress.get("ownership"), Some(&true));

        // Un-marking keeps the entry, now false
        user.record_concept_progress("ownership", false);
        assert_eq!(user.progress.get("ownership"), Some(&false));
    }

    #[test]
    fn test_mirror_course_concept() {
        let mut user = test_user();
        user.mirror_course_concept("rust-basics", "ownership", true);
        assert_eq!(user.progress.get("rust-basics_ownership"), Some(&true));

        // Un-completion deletes the mirror entry entirely
        user.mirror_course_concept("rust-basics", "ownership", false);
        assert!(!user.progress.contains_key("rust-basics_ownership"));
    }

    #[test]
    fn test_progress_serializes_as_plain_booleans() {
        let mut user = test_user();
        user.record_concept_progress("variables", true);
        user.record_concept_progress("ownership", false);

        let json = serde_json::to_value(&user.progress).unwrap();
        assert_eq!(json["variables"], serde_json::Value::Bool(true));
        assert_eq!(json["ownership"], serde_json::Value::Bool(false));
    }
}
