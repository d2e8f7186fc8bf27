//! Authentication service
//!
//! Email/password login with a retry counter. Once the counter reaches the
//! configured threshold the account is deactivated; only an administrator
//! can reactivate it.

use std::sync::Arc;

use crate::app::password::PasswordHasher;
use crate::domain::entities::User;
use crate::domain::ports::UserRepository;
use crate::error::AppError;

pub struct AuthService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    hasher: PasswordHasher,
    max_retry_count: i32,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, hasher: PasswordHasher, max_retry_count: i32) -> Self {
        Self {
            users,
            hasher,
            max_retry_count,
        }
    }

    /// Verify credentials and update the retry counter
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user with email {}", email)))?;

        if !user.is_active() {
            return Err(AppError::PassiveUser(email.to_string()));
        }

        if !self.hasher.verify(password, &user.password) {
            let remaining_attempts = self.record_failure(&user).await?;
            return Err(AppError::WrongPassword {
                email: email.to_string(),
                remaining_attempts,
            });
        }

        self.users.reset_retry_count(user.id).await?;
        user.password_retry_count = 0;

        if self.hasher.needs_rehash(&user.password) {
            let hashed = self.hasher.hash(password)?;
            self.users.update_password(user.id, &hashed).await?;
            user.password = hashed;
            tracing::debug!(user_id = %user.id, "Re-hashed legacy password");
        }

        Ok(user)
    }

    /// Replace a password after checking the current one.
    ///
    /// A wrong current password counts as a failed login.
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<User, AppError> {
        if new_password.is_empty() {
            return Err(AppError::BadRequest("new password is empty".to_string()));
        }

        let not_found =
            || AppError::NotFound(format!("user with email {} and given password", email));

        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(not_found)?;

        if !self.hasher.verify(old_password, &user.password) {
            if user.is_active() {
                self.record_failure(&user).await?;
            }
            return Err(not_found());
        }

        let hashed = self.hasher.hash(new_password)?;
        self.users.update_password(user.id, &hashed).await?;
        user.password = hashed;
        user.password_retry_count = 0;
        tracing::info!(user_id = %user.id, "Password changed");

        Ok(user)
    }

    /// Count a failed attempt; returns the attempts left or the lockout error
    async fn record_failure(&self, user: &User) -> Result<i32, AppError> {
        let retry_count = self
            .users
            .record_failed_login(user.id, self.max_retry_count)
            .await?
            .ok_or(AppError::UserLockedOut)?;

        if retry_count >= self.max_retry_count {
            tracing::warn!(user_id = %user.id, retry_count, "User locked out after failed logins");
            return Err(AppError::UserLockedOut);
        }

        tracing::info!(user_id = %user.id, retry_count, "Failed login");
        Ok(self.max_retry_count - retry_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::password::PasswordScheme;
    use crate::domain::entities::UserId;
    use crate::test_utils::{test_user, test_user_with_password, InMemoryUserRepository};

    fn hasher() -> PasswordHasher {
        PasswordHasher::low_cost(PasswordScheme::Argon2id, "test-pepper")
    }

    fn create_service(users: Arc<InMemoryUserRepository>) -> AuthService<InMemoryUserRepository> {
        AuthService::new(users, hasher(), 3)
    }

    #[tokio::test]
    async fn login_success_resets_counter() {
        let mut user = test_user_with_password(1, "ada@example.com", &hasher().hash("pw").unwrap());
        user.password_retry_count = 2;
        let users = Arc::new(InMemoryUserRepository::new().with_user(user));
        let service = create_service(users.clone());

        let logged_in = service.login("ada@example.com", "pw").await.unwrap();

        assert_eq!(logged_in.id, UserId(1));
        assert_eq!(logged_in.password_retry_count, 0);
        let stored = users.get(UserId(1)).unwrap();
        assert_eq!(stored.password_retry_count, 0);
        assert!(stored.is_active());
    }

    #[tokio::test]
    async fn unknown_email_is_no_related_data() {
        let service = create_service(Arc::new(InMemoryUserRepository::new()));

        let result = service.login("nobody@example.com", "pw").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn passive_user_is_rejected_before_password_check() {
        let mut user = test_user_with_password(1, "ada@example.com", "pw");
        user.audit.active = false;
        let users = Arc::new(InMemoryUserRepository::new().with_user(user));
        let service = create_service(users.clone());

        let result = service.login("ada@example.com", "wrong").await;

        assert!(matches!(result, Err(AppError::PassiveUser(_))));
        assert_eq!(users.get(UserId(1)).unwrap().password_retry_count, 0);
    }

    #[tokio::test]
    async fn wrong_password_increments_counter() {
        let user = test_user_with_password(1, "ada@example.com", "pw");
        let users = Arc::new(InMemoryUserRepository::new().with_user(user));
        let service = create_service(users.clone());

        let result = service.login("ada@example.com", "wrong").await;

        match result {
            Err(AppError::WrongPassword {
                remaining_attempts, ..
            }) => assert_eq!(remaining_attempts, 2),
            other => panic!("Expected WrongPassword, got {:?}", other),
        }
        let stored = users.get(UserId(1)).unwrap();
        assert_eq!(stored.password_retry_count, 1);
        assert!(stored.is_active());
    }

    #[tokio::test]
    async fn third_failure_locks_the_account() {
        let user = test_user_with_password(1, "ada@example.com", "pw");
        let users = Arc::new(InMemoryUserRepository::new().with_user(user));
        let service = create_service(users.clone());

        assert!(matches!(
            service.login("ada@example.com", "x").await,
            Err(AppError::WrongPassword { .. })
        ));
        assert!(matches!(
            service.login("ada@example.com", "x").await,
            Err(AppError::WrongPassword { .. })
        ));
        assert!(matches!(
            service.login("ada@example.com", "x").await,
            Err(AppError::UserLockedOut)
        ));

        let stored = users.get(UserId(1)).unwrap();
        assert!(!stored.is_active());
        assert_eq!(stored.password_retry_count, 3);

        // Correct password no longer helps
        assert!(matches!(
            service.login("ada@example.com", "pw").await,
            Err(AppError::PassiveUser(_))
        ));
    }

    #[tokio::test]
    async fn legacy_plaintext_password_is_rehashed() {
        let user = test_user_with_password(1, "ada@example.com", "legacy");
        let users = Arc::new(InMemoryUserRepository::new().with_user(user));
        let service = create_service(users.clone());

        service.login("ada@example.com", "legacy").await.unwrap();

        let stored = users.get(UserId(1)).unwrap();
        assert!(stored.password.starts_with("$argon2id$"));
        assert!(hasher().verify("legacy", &stored.password));
        // And the new hash keeps working
        service.login("ada@example.com", "legacy").await.unwrap();
    }

    #[tokio::test]
    async fn plaintext_scheme_keeps_raw_comparison() {
        let user = test_user_with_password(1, "ada@example.com", "pw");
        let users = Arc::new(InMemoryUserRepository::new().with_user(user));
        let service = AuthService::new(
            users.clone(),
            PasswordHasher::new(PasswordScheme::Plaintext, ""),
            3,
        );

        service.login("ada@example.com", "pw").await.unwrap();

        assert_eq!(users.get(UserId(1)).unwrap().password, "pw");
    }

    #[tokio::test]
    async fn active_row_wins_when_email_is_shared() {
        let mut old = test_user_with_password(1, "ada@example.com", "old");
        old.audit.active = false;
        let current = test_user_with_password(2, "ada@example.com", "new");
        let users = Arc::new(InMemoryUserRepository::new().with_user(old).with_user(current));
        let service = create_service(users);

        let user = service.login("ada@example.com", "new").await.unwrap();

        assert_eq!(user.id, UserId(2));
    }

    #[tokio::test]
    async fn change_password_requires_old_password() {
        let user = test_user_with_password(1, "ada@example.com", "old");
        let users = Arc::new(InMemoryUserRepository::new().with_user(user));
        let service = create_service(users.clone());

        let result = service
            .change_password("ada@example.com", "wrong", "new")
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let changed = service
            .change_password("ada@example.com", "old", "new")
            .await
            .unwrap();
        assert_eq!(changed.id, UserId(1));
        assert!(changed.password.starts_with("$argon2id$"));
        assert_eq!(changed.password_retry_count, 0);
        assert_eq!(users.get(UserId(1)).unwrap().password, changed.password);

        service.login("ada@example.com", "new").await.unwrap();
    }

    #[tokio::test]
    async fn wrong_old_password_counts_towards_lockout() {
        let user = test_user_with_password(1, "ada@example.com", "old");
        let users = Arc::new(InMemoryUserRepository::new().with_user(user));
        let service = create_service(users.clone());

        for _ in 0..2 {
            assert!(matches!(
                service.change_password("ada@example.com", "guess", "new").await,
                Err(AppError::NotFound(_))
            ));
        }
        assert_eq!(users.get(UserId(1)).unwrap().password_retry_count, 2);

        assert!(matches!(
            service.change_password("ada@example.com", "guess", "new").await,
            Err(AppError::UserLockedOut)
        ));
        assert!(!users.get(UserId(1)).unwrap().is_active());
        assert!(matches!(
            service.login("ada@example.com", "old").await,
            Err(AppError::PassiveUser(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_failures_are_all_counted() {
        let user = test_user_with_password(1, "ada@example.com", "pw");
        let users = Arc::new(
            InMemoryUserRepository::new()
                .with_user(user)
                .with_interleaving(),
        );
        let service = create_service(users.clone());

        let (a, b, c) = tokio::join!(
            service.login("ada@example.com", "x"),
            service.login("ada@example.com", "y"),
            service.login("ada@example.com", "z")
        );

        let locked_out = [a, b, c]
            .iter()
            .filter(|r| matches!(r, Err(AppError::UserLockedOut)))
            .count();
        assert_eq!(locked_out, 1);

        let stored = users.get(UserId(1)).unwrap();
        assert_eq!(stored.password_retry_count, 3);
        assert!(!stored.is_active());
    }

    #[tokio::test]
    async fn change_password_resets_counter() {
        let mut user = test_user();
        user.password = "old".to_string();
        user.password_retry_count = 2;
        let email = user.fields.email.clone();
        let users = Arc::new(InMemoryUserRepository::new().with_user(user));
        let service = create_service(users.clone());

        service.change_password(&email, "old", "new").await.unwrap();

        assert_eq!(users.get(UserId(1)).unwrap().password_retry_count, 0);
    }

    #[tokio::test]
    async fn change_password_rejects_empty_value() {
        let user = test_user_with_password(1, "ada@example.com", "old");
        let service = create_service(Arc::new(InMemoryUserRepository::new().with_user(user)));

        let result = service.change_password("ada@example.com", "old", "").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
