use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{
    AuthError, JwtService, LoginRequest, PasswordHasher, RegisterRequest, UserSession,
};
use crate::models::{self, AuthPayload, User, UserDto};
use crate::store::{StoreError, UserStore};

/// Registers and authenticates users, and turns bearer tokens back into users.
#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    hasher: PasswordHasher,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("jwt_service", &self.jwt_service)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt_service: JwtService, hasher: PasswordHasher) -> Self {
        Self {
            jwt_service,
            hasher,
            users,
        }
    }

    /// Register a new user
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthPayload, AuthError> {
        let email = normalize_email(&request.email);
        if email.is_empty() {
            return Err(AuthError::Validation("email is required".to_string()));
        }
        if request.password.is_empty() {
            return Err(AuthError::Validation("password is required".to_string()));
        }

        // Check if user already exists
        if self.users.find_user_by_email(&email).await?.is_some() {
            tracing::debug!("registration rejected, email taken");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(&request.password).await?;
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name: request
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            role: None,
            created_at: models::now(),
        };

        // Signed before the insert so a signing failure writes nothing
        let token = self.jwt_service.create_token(user.id)?;

        // A concurrent registration can still win the race; the store's
        // uniqueness check is authoritative.
        self.users.insert_user(&user).await.map_err(|err| match err {
            StoreError::AlreadyExists => AuthError::DuplicateEmail,
            other => AuthError::Store(other),
        })?;

        tracing::info!(user_id = %user.id, "registered user");

        Ok(AuthPayload {
            token,
            user: UserDto::from(&user),
        })
    }

    /// Login user
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<AuthPayload, AuthError> {
        let email = normalize_email(&request.email);

        // Unknown email and wrong password look the same to the caller
        let user = self
            .users
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(&request.password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt_service.create_token(user.id)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(AuthPayload {
            token,
            user: UserDto::from(&user),
        })
    }

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// `Ok(None)` means the token was valid but its subject no longer exists.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<UserSession>, AuthError> {
        let (user_id, expires_at) = self.jwt_service.verify_subject(token)?;
        let user = self.users.find_user_by_id(user_id).await?;

        Ok(user.map(|user| UserSession { user, expires_at }))
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MIN_BCRYPT_COST;
    use crate::store::MockUserStore;
    use assert_matches::assert_matches;
    use chrono::Duration;

    fn service_with(store: MockUserStore) -> AuthService {
        AuthService::new(
            Arc::new(store),
            JwtService::new("unit_test_secret", Duration::hours(1)),
            PasswordHasher::new(MIN_BCRYPT_COST),
        )
    }

    #[tokio::test]
    async fn test_register_maps_unique_violation_to_duplicate_email() {
        let mut store = MockUserStore::new();
        store.expect_find_user_by_email().returning(|_| Ok(None));
        store
            .expect_insert_user()
            .times(1)
            .returning(|_| Err(StoreError::AlreadyExists));

        let result = service_with(store)
            .register(RegisterRequest {
                email: "race@example.com".to_string(),
                password: "password".to_string(),
                name: None,
            })
            .await;

        assert_matches!(result, Err(AuthError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_register_existing_email_never_inserts() {
        let mut store = MockUserStore::new();
        store.expect_find_user_by_email().times(1).returning(|email| {
            Ok(Some(User {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password_hash: "$2b$04$existing".to_string(),
                name: None,
                role: None,
                created_at: models::now(),
            }))
        });
        store.expect_insert_user().times(0);

        let result = service_with(store)
            .register(RegisterRequest {
                email: "Taken@Example.com".to_string(),
                password: "password".to_string(),
                name: None,
            })
            .await;

        assert_matches!(result, Err(AuthError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_register_with_unsignable_token_writes_nothing() {
        let mut store = MockUserStore::new();
        store.expect_find_user_by_email().returning(|_| Ok(None));
        store.expect_insert_user().times(0);

        let service = AuthService::new(
            Arc::new(store),
            JwtService::new("unit_test_secret", Duration::days(365 * 300_000)),
            PasswordHasher::new(MIN_BCRYPT_COST),
        );
        let result = service
            .register(RegisterRequest {
                email: "late@example.com".to_string(),
                password: "password".to_string(),
                name: None,
            })
            .await;

        assert_matches!(result, Err(AuthError::TokenLifetime));
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_name() {
        let mut store = MockUserStore::new();
        store.expect_find_user_by_email().returning(|_| Ok(None));
        store.expect_insert_user().returning(|_| Ok(()));

        let payload = service_with(store)
            .register(RegisterRequest {
                email: "  Mixed@Example.com ".to_string(),
                password: "password".to_string(),
                name: Some("  ".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(payload.user.email, "mixed@example.com");
        assert_eq!(payload.user.name, None);
    }

    #[tokio::test]
    async fn test_register_rejects_empty_password() {
        let store = MockUserStore::new();
        let result = service_with(store)
            .register(RegisterRequest {
                email: "a@example.com".to_string(),
                password: String::new(),
                name: None,
            })
            .await;

        assert_matches!(result, Err(AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_resolve_session_for_deleted_user() {
        let mut store = MockUserStore::new();
        store.expect_find_user_by_id().returning(|_| Ok(None));
        let service = service_with(store);

        let token = service.jwt_service().create_token(Uuid::new_v4()).unwrap();
        assert!(service.resolve_session(&token).await.unwrap().is_none());
    }
}
