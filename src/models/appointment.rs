use async_graphql::{Enum, InputObject, SimpleObject, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::timestamp::format_timestamp;

/// Appointment lifecycle status. Any value may be set directly; there is no
/// enforced transition order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Enum,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
#[graphql(rename_items = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub client_name: String,
    pub client_email: String,
    pub location: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
#[graphql(name = "CreateAppointmentInput")]
pub struct CreateAppointment {
    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub client_name: String,
    pub client_email: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
#[graphql(name = "UpdateAppointmentInput")]
pub struct UpdateAppointment {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Appointment")]
pub struct AppointmentDto {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub status: AppointmentStatus,
    pub client_name: String,
    pub client_email: String,
    pub location: String,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Appointment> for AppointmentDto {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: ID(appointment.id.to_string()),
            title: appointment.title.clone(),
            description: appointment.description.clone(),
            start_time: format_timestamp(&appointment.start_time),
            end_time: format_timestamp(&appointment.end_time),
            status: appointment.status,
            client_name: appointment.client_name.clone(),
            client_email: appointment.client_email.clone(),
            location: appointment.location.clone(),
            notes: appointment.notes.clone(),
            created_at: format_timestamp(&appointment.created_at),
            updated_at: format_timestamp(&appointment.updated_at),
        }
    }
}

impl From<Appointment> for AppointmentDto {
    fn from(appointment: Appointment) -> Self {
        AppointmentDto::from(&appointment)
    }
}
