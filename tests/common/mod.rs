#![allow(dead_code)]

use std::sync::{Arc, Once};

use appointment_api::api::schema::{build_schema, AppSchema};
use appointment_api::auth::{AuthService, JwtService, PasswordHasher, MIN_BCRYPT_COST};
use appointment_api::models::CreateAppointment;
use appointment_api::services::AppointmentService;
use appointment_api::store::MemoryStore;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only";

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

/// Services wired to a fresh in-memory store
pub struct TestApp {
    pub store: MemoryStore,
    pub auth_service: AuthService,
    pub appointment_service: AppointmentService,
}

impl TestApp {
    pub fn new() -> Self {
        init_test_logging();

        let store = MemoryStore::new();
        let auth_service = AuthService::new(
            Arc::new(store.clone()),
            JwtService::new(TEST_JWT_SECRET, chrono::Duration::hours(1)),
            PasswordHasher::new(MIN_BCRYPT_COST),
        );
        let appointment_service = AppointmentService::new(Arc::new(store.clone()));

        Self {
            store,
            auth_service,
            appointment_service,
        }
    }

    pub fn schema(&self) -> AppSchema {
        build_schema(self.auth_service.clone(), self.appointment_service.clone())
    }
}

/// Mock data generators
pub struct MockDataGenerator;

impl MockDataGenerator {
    pub fn email() -> String {
        SafeEmail().fake()
    }

    pub fn name() -> String {
        Name().fake()
    }

    /// A valid create input for the given window
    pub fn appointment(start_time: &str, end_time: &str) -> CreateAppointment {
        CreateAppointment {
            title: Sentence(2..5).fake(),
            description: None,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            client_name: Self::name(),
            client_email: Self::email(),
            location: None,
            notes: None,
            status: None,
        }
    }
}
