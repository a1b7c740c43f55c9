pub mod appointment;
pub mod available_slot;
pub mod service;
pub mod user;
