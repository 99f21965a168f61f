use chrono::{DateTime, Utc};
use thiserror::Error;

use super::appointment::Appointment;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("End time must be after start time")]
    InvalidRange,
}

/// Check that an appointment window is non-empty and forward in time.
pub fn validate_time_range(
    start_time: &DateTime<Utc>,
    end_time: &DateTime<Utc>,
) -> Result<(), AppointmentValidationError> {
    if end_time <= start_time {
        return Err(AppointmentValidationError::InvalidRange);
    }
    Ok(())
}

/// Trim the required text fields and lowercase the client email.
pub fn normalize_appointment(appointment: &mut Appointment) {
    appointment.title = appointment.title.trim().to_string();
    appointment.client_name = appointment.client_name.trim().to_string();
    appointment.client_email = appointment.client_email.trim().to_lowercase();
}

/// Field-level checks run on every record right before it is written.
///
/// Expects a normalized record. Status membership is guaranteed by the type.
pub fn validate_appointment(appointment: &Appointment) -> Result<(), AppointmentValidationError> {
    if appointment.title.is_empty() {
        return Err(AppointmentValidationError::MissingField("title"));
    }

    if appointment.client_name.is_empty() {
        return Err(AppointmentValidationError::MissingField("clientName"));
    }

    if appointment.client_email.is_empty() {
        return Err(AppointmentValidationError::MissingField("clientEmail"));
    }

    validate_time_range(&appointment.start_time, &appointment.end_time)
}
