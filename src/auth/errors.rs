use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email already in use")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Token lifetime is out of range")]
    TokenLifetime,
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] crate::auth::password::PasswordError),
}

impl AuthError {
    /// Machine-readable code carried in the GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::InvalidAuthHeaderFormat => {
                "UNAUTHENTICATED"
            }
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::Store(_)
            | AuthError::TokenLifetime
            | AuthError::Jwt(_)
            | AuthError::PasswordHashing(_) => "INTERNAL_ERROR",
        }
    }

    fn is_internal(&self) -> bool {
        self.code() == "INTERNAL_ERROR"
    }
}

impl ErrorExtensions for AuthError {
    fn extend(&self) -> async_graphql::Error {
        let message = if self.is_internal() {
            tracing::error!(error = %self, "authentication request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let code = self.code();
        async_graphql::Error::new(message).extend_with(|_, extensions| extensions.set("code", code))
    }
}
