// Business logic services

pub mod appointment_service;
pub mod errors;

pub use appointment_service::{parse_appointment_id, AppointmentService};
pub use errors::AppointmentError;
