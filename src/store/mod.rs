//! Persistence seams for users and appointments.
//!
//! Services only talk to these traits. [`PgStore`] is the production backend;
//! [`MemoryStore`] keeps everything in process and backs the test suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Appointment, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("already exists")]
    AlreadyExists,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Credential store. Emails are unique.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with [`StoreError::AlreadyExists`] when the
    /// email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// Appointment store. Writes are atomic per record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// All appointments, earliest start first.
    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError>;

    async fn find_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;

    async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), StoreError>;

    /// Replace a stored appointment. Returns `false` if no record has that id.
    async fn update_appointment(&self, appointment: &Appointment) -> Result<bool, StoreError>;

    /// Returns `false` if no record has that id.
    async fn delete_appointment(&self, id: Uuid) -> Result<bool, StoreError>;
}
