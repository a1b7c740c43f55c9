//! Domain entities.

pub mod appointment;
pub mod available_slot;
pub mod service;
pub mod user;

pub use appointment::{Appointment, AppointmentRecord};
pub use available_slot::AvailableSlot;
pub use service::Service;
pub use user::{Password, User};
