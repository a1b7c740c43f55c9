//! Accept/reject results of the booking use cases.
//!
//! A rejection is a normal business answer, not a failure, so it never travels through
//! [`crate::error::ServiceError`].

use std::fmt;

/// Why a booking or slot registration was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// No availability slot of the staff member covers the requested window.
    OutsideAvailability,
    /// A scheduled appointment of the staff member already occupies the window.
    AppointmentConflict,
    /// The new slot overlaps an existing slot on the same weekday.
    SlotConflict,
}

impl Rejection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutsideAvailability => "outside_availability",
            Self::AppointmentConflict => "appointment_conflict",
            Self::SlotConflict => "slot_conflict",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Accepted(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    #[must_use]
    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(*rejection),
        }
    }
}
