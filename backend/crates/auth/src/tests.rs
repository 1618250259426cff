//! Use-case tests against an in-memory repository

use std::collections::HashMap;
use std::sync::Arc;

use platform::password::ClearTextPassword;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::progress::POINTS_PER_CONCEPT;
use crate::application::{
    CurrentUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdateProfileInput, UpdateProfileUseCase, UpdateProgressInput, UpdateProgressUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-Memory Repository
// ============================================================================

/// In-memory user repository with the same optimistic-lock semantics
/// as the PostgreSQL implementation
#[derive(Clone, Default)]
pub(crate) struct MemoryUserRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        users.insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let users = self.users.lock().await;
        Ok(users.values().any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().await;

        let stored = users
            .get_mut(user.user_id.as_uuid())
            .ok_or(AuthError::VersionConflict)?;

        if stored.version != user.version {
            return Err(AuthError::VersionConflict);
        }

        let mut updated = user.clone();
        updated.version += 1;
        *stored = updated;
        Ok(())
    }
}

/// Repository wrapper that fails the first N updates with a version
/// conflict, to exercise retry loops
#[derive(Clone)]
struct FlakyRepository {
    inner: MemoryUserRepository,
    conflicts_remaining: Arc<Mutex<usize>>,
}

impl FlakyRepository {
    fn new(inner: MemoryUserRepository, conflicts: usize) -> Self {
        Self {
            inner,
            conflicts_remaining: Arc::new(Mutex::new(conflicts)),
        }
    }
}

impl UserRepository for FlakyRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.inner.create(user).await
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        self.inner.find_by_id(user_id).await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.inner.find_by_email(email).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        self.inner.exists_by_email(email).await
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut remaining = self.conflicts_remaining.lock().await;
        if *remaining > 0 {
            *remaining -= 1;
            return Err(AuthError::VersionConflict);
        }
        drop(remaining);

        self.inner.update(user).await
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::development())
}

async fn register_alice(repo: &Arc<MemoryUserRepository>, config: &Arc<AuthConfig>) -> User {
    let use_case = RegisterUseCase::new(repo.clone(), config.clone());
    let output = use_case
        .execute(RegisterInput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    output.user
}

// ============================================================================
// Register / Login
// ============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();

    let user = register_alice(&repo, &config).await;
    assert_eq!(user.email.as_str(), "alice@example.com");
    assert_eq!(user.points, 0);

    let login = LoginUseCase::new(repo.clone(), config.clone());
    let output = login
        .execute(LoginInput {
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(output.user.user_id, user.user_id);
    assert!(!output.session_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();

    register_alice(&repo, &config).await;

    let use_case = RegisterUseCase::new(repo.clone(), config.clone());
    let result = use_case
        .execute(RegisterInput {
            name: "Alice Again".to_string(),
            email: "Alice@Example.com".to_string(), // Same after normalization
            password: "another-secret".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::EmailTaken)));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();

    let use_case = RegisterUseCase::new(repo.clone(), config.clone());
    let result = use_case
        .execute(RegisterInput {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "short".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::PasswordValidation(_))));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();

    register_alice(&repo, &config).await;

    let login = LoginUseCase::new(repo.clone(), config.clone());
    let result = login
        .execute(LoginInput {
            email: "alice@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_login_unknown_email_is_indistinguishable() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();

    let login = LoginUseCase::new(repo.clone(), config.clone());
    let result = login
        .execute(LoginInput {
            email: "nobody@example.com".to_string(),
            password: "whatever".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

// ============================================================================
// Session Resolution
// ============================================================================

#[tokio::test]
async fn test_token_resolves_to_user() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();

    let register = RegisterUseCase::new(repo.clone(), config.clone());
    let output = register
        .execute(RegisterInput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    let current = CurrentUserUseCase::new(repo.clone(), config.clone());
    let user = current.execute(&output.session_token).await.unwrap();
    assert_eq!(user.user_id, output.user.user_id);
}

#[tokio::test]
async fn test_valid_token_for_deleted_user_is_not_found() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();

    let token =
        crate::application::session::generate_session_token(&config, &UserId::new());

    let current = CurrentUserUseCase::new(repo.clone(), config.clone());
    let result = current.execute(&token).await;
    assert!(matches!(result, Err(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();

    let current = CurrentUserUseCase::new(repo.clone(), config.clone());
    let result = current.execute("garbage.token.value").await;
    assert!(matches!(result, Err(AuthError::SessionInvalid)));
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_update_profile() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();
    let user = register_alice(&repo, &config).await;

    let use_case = UpdateProfileUseCase::new(repo.clone(), config.clone());
    let updated = use_case
        .execute(
            &user.user_id,
            UpdateProfileInput {
                name: Some("Alice Smith".to_string()),
                avatar: None,
                password: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name.as_str(), "Alice Smith");
    // Avatar untouched
    assert_eq!(updated.avatar, config.default_avatar);
}

#[tokio::test]
async fn test_update_profile_rehashes_password() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();
    let user = register_alice(&repo, &config).await;

    let use_case = UpdateProfileUseCase::new(repo.clone(), config.clone());
    use_case
        .execute(
            &user.user_id,
            UpdateProfileInput {
                name: None,
                avatar: None,
                password: Some("newsecret".to_string()),
            },
        )
        .await
        .unwrap();

    // The repository must hold the re-hashed password
    let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
    let new_password = ClearTextPassword::new("newsecret".to_string()).unwrap();
    assert!(stored.password_hash.verify(&new_password, config.pepper()));

    // Old password no longer works, new one does
    let login = LoginUseCase::new(repo.clone(), config.clone());
    let old = login
        .execute(LoginInput {
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await;
    assert!(matches!(old, Err(AuthError::InvalidCredentials)));

    login
        .execute(LoginInput {
            email: "alice@example.com".to_string(),
            password: "newsecret".to_string(),
        })
        .await
        .unwrap();
}

// ============================================================================
// Flat Progress
// ============================================================================

#[tokio::test]
async fn test_progress_awards_points() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();
    let user = register_alice(&repo, &config).await;

    let use_case = UpdateProgressUseCase::new(repo.clone());
    let updated = use_case
        .execute(
            &user.user_id,
            UpdateProgressInput {
                concept_key: "ownership".to_string(),
                completed: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.points, POINTS_PER_CONCEPT);
    assert_eq!(updated.progress.get("ownership"), Some(&true));
}

#[tokio::test]
async fn test_progress_unmark_keeps_points() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();
    let user = register_alice(&repo, &config).await;

    let use_case = UpdateProgressUseCase::new(repo.clone());
    use_case
        .execute(
            &user.user_id,
            UpdateProgressInput {
                concept_key: "ownership".to_string(),
                completed: true,
            },
        )
        .await
        .unwrap();

    let updated = use_case
        .execute(
            &user.user_id,
            UpdateProgressInput {
                concept_key: "ownership".to_string(),
                completed: false,
            },
        )
        .await
        .unwrap();

    // Points are never clawed back
    assert_eq!(updated.points, POINTS_PER_CONCEPT);
    assert_eq!(updated.progress.get("ownership"), Some(&false));
}

#[tokio::test]
async fn test_progress_rejects_blank_concept() {
    let repo = Arc::new(MemoryUserRepository::new());
    let config = test_config();
    let user = register_alice(&repo, &config).await;

    let use_case = UpdateProgressUseCase::new(repo.clone());
    let result = use_case
        .execute(
            &user.user_id,
            UpdateProgressInput {
                concept_key: "   ".to_string(),
                completed: true,
            },
        )
        .await;

    assert!(matches!(result, Err(AuthError::Validation(_))));
}

// ============================================================================
// Optimistic Locking
// ============================================================================

#[tokio::test]
async fn test_update_retries_through_version_conflicts() {
    let inner = MemoryUserRepository::new();
    let config = test_config();

    let inner_arc = Arc::new(inner.clone());
    let user = register_alice(&inner_arc, &config).await;

    // Two conflicts, then success on the third attempt
    let flaky = Arc::new(FlakyRepository::new(inner, 2));
    let use_case = UpdateProgressUseCase::new(flaky);

    let updated = use_case
        .execute(
            &user.user_id,
            UpdateProgressInput {
                concept_key: "ownership".to_string(),
                completed: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.points, POINTS_PER_CONCEPT);
}

#[tokio::test]
async fn test_update_gives_up_after_max_retries() {
    let inner = MemoryUserRepository::new();
    let config = test_config();

    let inner_arc = Arc::new(inner.clone());
    let user = register_alice(&inner_arc, &config).await;

    let flaky = Arc::new(FlakyRepository::new(inner, 10));
    let use_case = UpdateProgressUseCase::new(flaky);

    let result = use_case
        .execute(
            &user.user_id,
            UpdateProgressInput {
                concept_key: "ownership".to_string(),
                completed: true,
            },
        )
        .await;

    assert!(matches!(result, Err(AuthError::VersionConflict)));
}

#[tokio::test]
async fn test_memory_repo_detects_stale_writes() {
    let repo = MemoryUserRepository::new();
    let config = test_config();
    let repo_arc = Arc::new(repo.clone());

    let user = register_alice(&repo_arc, &config).await;

    // Two readers grab the same version
    let mut first = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
    let mut second = repo.find_by_id(&user.user_id).await.unwrap().unwrap();

    first.award_points(50);
    repo.update(&first).await.unwrap();

    second.award_points(50);
    let result = repo.update(&second).await;
    assert!(matches!(result, Err(AuthError::VersionConflict)));
}
