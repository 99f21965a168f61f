use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{AppointmentStore, StoreError, UserStore};
use crate::models::{Appointment, User};

const USER_COLUMNS: &str = "id, email, password_hash, name, role, created_at";

const APPOINTMENT_COLUMNS: &str = "id, title, description, start_time, end_time, status, \
     client_name, client_email, location, notes, created_at, updated_at";

/// Postgres-backed store sharing one connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::AlreadyExists,
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, name, role, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.role)
        .bind(user.created_at)
        .execute(&self.db)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl AppointmentStore for PgStore {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let appointments = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY start_time ASC, created_at ASC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(appointments)
    }

    async fn find_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(appointment)
    }

    async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO appointments (
                id, title, description, start_time, end_time, status,
                client_name, client_email, location, notes, created_at, updated_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(appointment.id)
        .bind(&appointment.title)
        .bind(&appointment.description)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .bind(appointment.status)
        .bind(&appointment.client_name)
        .bind(&appointment.client_email)
        .bind(&appointment.location)
        .bind(&appointment.notes)
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(&self.db)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn update_appointment(&self, appointment: &Appointment) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE appointments
             SET title = $2,
                 description = $3,
                 start_time = $4,
                 end_time = $5,
                 status = $6,
                 client_name = $7,
                 client_email = $8,
                 location = $9,
                 notes = $10,
                 updated_at = $11
             WHERE id = $1",
        )
        .bind(appointment.id)
        .bind(&appointment.title)
        .bind(&appointment.description)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .bind(appointment.status)
        .bind(&appointment.client_name)
        .bind(&appointment.client_email)
        .bind(&appointment.location)
        .bind(&appointment.notes)
        .bind(appointment.updated_at)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_appointment(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
