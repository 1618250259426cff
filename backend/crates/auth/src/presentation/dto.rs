//! API DTOs (Data Transfer Objects)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::enrollment::Enrollment;
use crate::domain::entity::user::User;

// ============================================================================
// Requests
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request (partial)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    /// Re-hashed before storage when present
    pub password: Option<String>,
}

/// Flat progress update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    /// Composite "courseId_conceptId" key
    pub concept_key: String,
    pub completed: bool,
}

// ============================================================================
// Responses
// ============================================================================

/// Compact user view returned from register/login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: String,
    pub streak: i64,
    pub points: i64,
    /// Login includes the legacy progress map, register does not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<BTreeMap<String, bool>>,
}

impl AuthUserDto {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            avatar: user.avatar.clone(),
            role: user.role.as_str().to_string(),
            streak: user.streak,
            points: user.points,
            progress: None,
        }
    }

    pub fn with_progress(user: &User) -> Self {
        Self {
            progress: Some(user.progress.clone()),
            ..Self::from_user(user)
        }
    }
}

/// Full user view returned from the profile endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: String,
    pub points: i64,
    pub streak: i64,
    pub progress: BTreeMap<String, bool>,
    pub enrolled_courses: Vec<Enrollment>,
    pub achievements: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserDto {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            avatar: user.avatar.clone(),
            role: user.role.as_str().to_string(),
            points: user.points,
            streak: user.streak,
            progress: user.progress.clone(),
            enrolled_courses: user.enrollments.clone(),
            achievements: user.achievements.clone(),
            created_at: user.created_at,
        }
    }
}

/// Register/login response carrying a token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: AuthUserDto,
}

/// User envelope for profile endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserDto,
}

/// Flat progress update response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEnvelope {
    pub success: bool,
    pub message: String,
    pub progress: BTreeMap<String, bool>,
    pub points: i64,
}

/// Plain success message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
