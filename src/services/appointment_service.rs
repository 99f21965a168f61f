use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    self, normalize_appointment, parse_timestamp, validate_appointment, validate_time_range,
    Appointment, AppointmentDto, CreateAppointment, UpdateAppointment,
};
use crate::services::AppointmentError;
use crate::store::AppointmentStore;

/// Validates and persists appointments.
///
/// Every write goes through the same sequence: build the candidate record,
/// normalize it, validate it, then issue exactly one store write. A rejected
/// operation never writes.
#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn AppointmentStore>,
}

/// Parse an API identifier. Anything that is not a UUID cannot name a record.
pub fn parse_appointment_id(id: &str) -> Result<Uuid, AppointmentError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppointmentError::NotFound)
}

fn parse_field(raw: &str, field: &'static str) -> Result<DateTime<Utc>, AppointmentError> {
    parse_timestamp(raw).ok_or(AppointmentError::InvalidDate(field))
}

/// Overlay the supplied fields of a partial update on the stored record.
fn apply_update(
    mut record: Appointment,
    patch: UpdateAppointment,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
) -> Appointment {
    if let Some(title) = patch.title {
        record.title = title;
    }
    if let Some(description) = patch.description {
        record.description = description;
    }
    if let Some(start_time) = start_time {
        record.start_time = start_time;
    }
    if let Some(end_time) = end_time {
        record.end_time = end_time;
    }
    if let Some(status) = patch.status {
        record.status = status;
    }
    if let Some(client_name) = patch.client_name {
        record.client_name = client_name;
    }
    if let Some(client_email) = patch.client_email {
        record.client_email = client_email;
    }
    if let Some(location) = patch.location {
        record.location = location;
    }
    if let Some(notes) = patch.notes {
        record.notes = notes;
    }

    record.updated_at = models::now().max(record.updated_at);
    record
}

impl AppointmentService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// All appointments, earliest start first.
    pub async fn list_appointments(&self) -> Result<Vec<AppointmentDto>, AppointmentError> {
        let appointments = self.store.list_appointments().await?;
        Ok(appointments.iter().map(AppointmentDto::from).collect())
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<AppointmentDto, AppointmentError> {
        self.store
            .find_appointment(id)
            .await?
            .map(AppointmentDto::from)
            .ok_or(AppointmentError::NotFound)
    }

    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_appointment(
        &self,
        input: CreateAppointment,
    ) -> Result<AppointmentDto, AppointmentError> {
        let start_time = parse_field(&input.start_time, "startTime")?;
        let end_time = parse_field(&input.end_time, "endTime")?;
        validate_time_range(&start_time, &end_time)?;

        let now = models::now();
        let mut appointment = Appointment {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description.unwrap_or_default(),
            start_time,
            end_time,
            status: input.status.unwrap_or_default(),
            client_name: input.client_name,
            client_email: input.client_email,
            location: input.location.unwrap_or_default(),
            notes: input.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        normalize_appointment(&mut appointment);
        validate_appointment(&appointment)?;

        self.store.insert_appointment(&appointment).await?;

        // Read back before reporting success
        let saved = self
            .store
            .find_appointment(appointment.id)
            .await?
            .ok_or_else(|| {
                AppointmentError::Persistence(format!(
                    "appointment {} missing after insert",
                    appointment.id
                ))
            })?;

        tracing::info!(appointment_id = %saved.id, "created appointment");
        Ok(AppointmentDto::from(&saved))
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_appointment(
        &self,
        id: Uuid,
        input: UpdateAppointment,
    ) -> Result<AppointmentDto, AppointmentError> {
        let existing = self
            .store
            .find_appointment(id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        let start_time = input
            .start_time
            .as_deref()
            .map(|raw| parse_field(raw, "startTime"))
            .transpose()?;
        let end_time = input
            .end_time
            .as_deref()
            .map(|raw| parse_field(raw, "endTime"))
            .transpose()?;

        // A bound that is not being changed keeps its stored value
        validate_time_range(
            &start_time.unwrap_or(existing.start_time),
            &end_time.unwrap_or(existing.end_time),
        )?;

        let mut updated = apply_update(existing, input, start_time, end_time);
        normalize_appointment(&mut updated);
        validate_appointment(&updated)?;

        if !self.store.update_appointment(&updated).await? {
            tracing::warn!("appointment deleted while being updated");
            return Err(AppointmentError::NotFound);
        }

        tracing::info!(status = updated.status.as_str(), "updated appointment");
        Ok(AppointmentDto::from(&updated))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_appointment(&self, id: Uuid) -> Result<(), AppointmentError> {
        if !self.store.delete_appointment(id).await? {
            return Err(AppointmentError::NotFound);
        }

        tracing::info!("deleted appointment");
        Ok(())
    }
}
