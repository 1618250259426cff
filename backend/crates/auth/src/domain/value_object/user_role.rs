//! User Role Value Object

use serde::{Deserialize, Serialize};

/// User role
///
/// Stored as a lowercase string in the database and in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Database/API representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// Parse from database value; unknown values fall back to User
    pub fn from_db(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        assert_eq!(UserRole::from_db("user"), UserRole::User);
        assert_eq!(UserRole::from_db("admin"), UserRole::Admin);
        assert_eq!(UserRole::from_db("garbage"), UserRole::User);
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_role_default() {
        assert_eq!(UserRole::default(), UserRole::User);
        assert!(!UserRole::default().is_admin());
    }
}
