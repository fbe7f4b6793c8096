//! Authentication service - Registration, login and session resolution.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use crate::domain::{normalize_email, NewUser, Password, RegisterUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{SessionClaims, TokenSigner, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Argon2 hash of a throwaway password, verified against when the email
/// is unknown so both failure paths cost the same.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$0Kq8m7JUsO7B1rJ6v0xG0n0s1rWmB3Yw0x0W7mS1cGs";

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a customer account (no admin role, no access)
    async fn register(&self, input: RegisterUser) -> AppResult<User>;

    /// Check credentials and return the account
    async fn login(&self, email: String, password: String) -> AppResult<User>;

    /// Signed session token for a logged-in user
    fn issue_session(&self, user: &User) -> AppResult<String>;

    /// Resolve a session token to its user.
    ///
    /// Bad signatures, expired tokens and deleted accounts all yield `None`.
    async fn resolve_session(&self, token: &str) -> Option<User>;

    /// Create the bootstrap admin unless an account with that email exists.
    /// Returns whether an account was created.
    async fn bootstrap_admin(&self, email: String, password: String) -> AppResult<bool>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    signer: TokenSigner,
    session_hours: i64,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, signer: TokenSigner, session_hours: i64) -> Self {
        Self {
            users,
            signer,
            session_hours,
        }
    }
}

/// First validation message of a form, in field order
fn first_message(errors: &validator::ValidationErrors) -> String {
    let fields = errors.field_errors();
    ["email", "password", "password_confirm"]
        .iter()
        .filter_map(|name| {
            fields
                .iter()
                .find(|(key, _)| AsRef::<str>::as_ref(key) == *name)
                .map(|(_, errs)| *errs)
        })
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string())
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, input: RegisterUser) -> AppResult<User> {
        let input = RegisterUser {
            email: normalize_email(&input.email),
            ..input
        };
        input
            .validate()
            .map_err(|e| AppError::validation(first_message(&e)))?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            tracing::info!(email = %input.email, "Registration rejected, email taken");
            return Err(AppError::conflict("An account with this email"));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let user = self
            .users
            .create(NewUser {
                email: input.email,
                password_hash,
                is_admin: false,
                has_access: false,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<User> {
        let email = normalize_email(&email);
        let user = self.users.find_by_email(&email).await?;

        // Verify even for unknown emails so response time does not leak
        // which accounts exist.
        let hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_string());
        let password_valid = Password::from_hash(hash).verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = user.id, "Login succeeded");
                Ok(user)
            }
            _ => {
                tracing::warn!(email = %email, "Login failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn issue_session(&self, user: &User) -> AppResult<String> {
        self.signer
            .sign(&SessionClaims::new(user.id, self.session_hours))
    }

    async fn resolve_session(&self, token: &str) -> Option<User> {
        let claims: SessionClaims = match self.signer.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session cookie");
                return None;
            }
        };

        match self.users.find_by_id(claims.sub).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, user_id = claims.sub, "Session lookup failed");
                None
            }
        }
    }

    async fn bootstrap_admin(&self, email: String, password: String) -> AppResult<bool> {
        let email = normalize_email(&email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = Password::new(&password)?.into_string();
        let admin = self
            .users
            .create(NewUser {
                email,
                password_hash,
                is_admin: true,
                has_access: true,
            })
            .await?;

        tracing::info!(user_id = admin.id, email = %admin.email, "Bootstrap admin created");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entitlement;
    use crate::infra::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    const SECRET: &[u8] = b"test-secret-key-that-is-long-enough-32";

    fn user(id: i32, email: &str, password: &str) -> User {
        User {
            id,
            email: email.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            is_admin: false,
            entitlement: Entitlement::default(),
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockUserRepository) -> Authenticator {
        Authenticator::new(Arc::new(repo), TokenSigner::new(SECRET), 1)
    }

    fn form(email: &str, password: &str, confirm: &str) -> RegisterUser {
        RegisterUser {
            email: email.to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("new@example.com"))
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|u| u.email == "new@example.com" && !u.is_admin && !u.has_access)
            .returning(|u| {
                Ok(User {
                    id: 5,
                    email: u.email,
                    password_hash: u.password_hash,
                    is_admin: false,
                    entitlement: Entitlement::default(),
                    created_at: Utc::now(),
                })
            });

        let created = service(repo)
            .register(form("  New@Example.com ", "secret", "secret"))
            .await
            .unwrap();
        assert_eq!(created.id, 5);
        assert!(!created.entitlement.has_access);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|e| Ok(Some(user(1, e, "secret"))));
        repo.expect_create().times(0);

        let err = service(repo)
            .register(form("USER@example.com", "secret", "secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let repo = MockUserRepository::new();
        let svc = service(repo);

        let err = svc.register(form("", "secret", "secret")).await.unwrap_err();
        assert_eq!(err.user_message(), "Please fill in all fields");

        let err = svc.register(form("a@b.c", "secret", "other")).await.unwrap_err();
        assert_eq!(err.user_message(), "Passwords do not match");
    }

    #[tokio::test]
    async fn test_login() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|e| {
            Ok((e == "user@example.com").then(|| user(3, e, "correct")))
        });
        let svc = service(repo);

        let ok = svc
            .login("User@Example.com".into(), "correct".into())
            .await
            .unwrap();
        assert_eq!(ok.id, 3);

        let wrong = svc.login("user@example.com".into(), "nope".into()).await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

        let unknown = svc.login("ghost@example.com".into(), "correct".into()).await;
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(9))
            .returning(|id| Ok(Some(user(id, "s@example.com", "pw"))));
        let svc = service(repo);

        let token = svc.issue_session(&user(9, "s@example.com", "pw")).unwrap();
        assert_eq!(svc.resolve_session(&token).await.map(|u| u.id), Some(9));
        assert!(svc.resolve_session("garbage").await.is_none());
    }

    #[tokio::test]
    async fn test_stale_session_resolves_to_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let svc = service(repo);

        let token = svc.issue_session(&user(4, "gone@example.com", "pw")).unwrap();
        assert!(svc.resolve_session(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_admin_created_when_missing() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|u| u.is_admin && u.has_access && u.email == "admin@tenderfinder.com")
            .times(1)
            .returning(|u| {
                Ok(User {
                    id: 1,
                    email: u.email,
                    password_hash: u.password_hash,
                    is_admin: true,
                    entitlement: Entitlement {
                        has_access: true,
                        access_until: None,
                    },
                    created_at: Utc::now(),
                })
            });

        let created = service(repo)
            .bootstrap_admin("admin@tenderfinder.com".into(), "admin123".into())
            .await
            .unwrap();
        assert!(created);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_skipped_when_present() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|e| Ok(Some(user(1, e, "admin123"))));
        repo.expect_create().times(0);

        let created = service(repo)
            .bootstrap_admin("admin@tenderfinder.com".into(), "admin123".into())
            .await
            .unwrap();
        assert!(!created);
    }
}
