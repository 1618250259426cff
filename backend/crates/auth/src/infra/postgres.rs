//! PostgreSQL Repository Implementations

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::{enrollment::Enrollment, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    name,
    email,
    password_hash,
    avatar,
    role,
    points,
    streak,
    progress,
    enrolled_courses,
    achievements,
    version,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                password_hash,
                avatar,
                role,
                points,
                streak,
                progress,
                enrolled_courses,
                achievements,
                version,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.avatar)
        .bind(user.role.as_str())
        .bind(user.points)
        .bind(user.streak)
        .bind(Json(&user.progress))
        .bind(Json(&user.enrollments))
        .bind(Json(&user.achievements))
        .bind(user.version)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        // Optimistic lock: the version in the WHERE clause must still
        // match, and a successful write bumps it.
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                password_hash = $3,
                avatar = $4,
                points = $5,
                streak = $6,
                progress = $7,
                enrolled_courses = $8,
                achievements = $9,
                updated_at = $10,
                version = version + 1
            WHERE user_id = $1 AND version = $11
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.avatar)
        .bind(user.points)
        .bind(user.streak)
        .bind(Json(&user.progress))
        .bind(Json(&user.enrollments))
        .bind(Json(&user.achievements))
        .bind(user.updated_at)
        .bind(user.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::VersionConflict);
        }

        Ok(())
    }
}

// ============================================================================
// Row Mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    avatar: String,
    role: String,
    points: i64,
    streak: i64,
    progress: Json<BTreeMap<String, bool>>,
    enrolled_courses: Json<Vec<Enrollment>>,
    achievements: Json<Vec<String>>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
            password_hash,
            avatar: self.avatar,
            role: UserRole::from_db(&self.role),
            points: self.points,
            streak: self.streak,
            progress: self.progress.0,
            enrollments: self.enrolled_courses.0,
            achievements: self.achievements.0,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
