//! Scheduling-validity core: temporal value types, the appointment, slot and service
//! entities, the pure scheduling rules and the persistence gateway contracts.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod model;
pub mod schedule;
pub mod types;
