// Records, wire DTOs and validation

pub mod appointment;
pub mod timestamp;
pub mod user;
pub mod validation;

pub use appointment::*;
pub use timestamp::*;
pub use user::*;
pub use validation::*;
