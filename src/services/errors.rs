use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::models::AppointmentValidationError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,
    #[error("Invalid {0} format")]
    InvalidDate(&'static str),
    #[error("End time must be after start time")]
    InvalidRange,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Failed to save appointment to database: {0}")]
    Persistence(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<AppointmentValidationError> for AppointmentError {
    fn from(err: AppointmentValidationError) -> Self {
        match err {
            AppointmentValidationError::InvalidRange => AppointmentError::InvalidRange,
            other => AppointmentError::Validation(other.to_string()),
        }
    }
}

impl AppointmentError {
    /// Machine-readable code carried in the GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            AppointmentError::NotFound => "NOT_FOUND",
            AppointmentError::InvalidDate(_) => "INVALID_DATE",
            AppointmentError::InvalidRange => "INVALID_RANGE",
            AppointmentError::Validation(_) => "VALIDATION_ERROR",
            AppointmentError::Persistence(_) => "PERSISTENCE_ERROR",
            AppointmentError::Store(_) => "INTERNAL_ERROR",
        }
    }
}

impl ErrorExtensions for AppointmentError {
    fn extend(&self) -> async_graphql::Error {
        let message = match self {
            AppointmentError::Store(err) => {
                tracing::error!(error = %err, "appointment store failure");
                "Internal server error".to_string()
            }
            AppointmentError::Persistence(detail) => {
                tracing::error!(detail = %detail, "appointment write not durable");
                "Failed to save appointment to database".to_string()
            }
            _ => self.to_string(),
        };

        let code = self.code();
        async_graphql::Error::new(message).extend_with(|_, extensions| extensions.set("code", code))
    }
}
