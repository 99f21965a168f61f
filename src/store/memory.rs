//! In-process store.
//!
//! Suitable for development and tests. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AppointmentStore, StoreError, UserStore};
use crate::models::{Appointment, User};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    appointments: Arc<RwLock<HashMap<Uuid, Appointment>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        // Checked under the write lock, same guarantee as a unique index.
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::AlreadyExists);
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let mut appointments: Vec<Appointment> =
            self.appointments.read().await.values().cloned().collect();
        appointments.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(appointments)
    }

    async fn find_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        Ok(self.appointments.read().await.get(&id).cloned())
    }

    async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), StoreError> {
        let mut appointments = self.appointments.write().await;
        if appointments.contains_key(&appointment.id) {
            return Err(StoreError::AlreadyExists);
        }
        appointments.insert(appointment.id, appointment.clone());
        Ok(())
    }

    async fn update_appointment(&self, appointment: &Appointment) -> Result<bool, StoreError> {
        let mut appointments = self.appointments.write().await;
        match appointments.get_mut(&appointment.id) {
            Some(stored) => {
                *stored = appointment.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_appointment(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.appointments.write().await.remove(&id).is_some())
    }
}
