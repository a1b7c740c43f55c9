//! Booking use cases: appointment booking, availability registration, service
//! management and user registration over the gateway contracts of `agenda-core`.

pub mod booking;
pub mod error;
pub mod locks;
pub mod outcome;
pub mod user;

pub use booking::BookingService;
pub use outcome::{Outcome, Rejection};
pub use user::UserService;
