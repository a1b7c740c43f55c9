//! Scheduling rules.
//!
//! Pure predicates deciding whether a candidate time window is covered by a recurring
//! availability slot and whether it collides with existing appointments or slots. Nothing
//! here performs I/O; the gateways fetch the data and the booking use case composes the
//! checks.
//!
//! Each check has its own boundary rule:
//! - containment is inclusive on both ends (a slot ending exactly when the window ends covers it)
//! - slot-to-slot overlap is half-open (adjacent slots do not conflict)
//! - appointment overlap uses closed intervals and a fixed occupancy, see [`appointment`]

pub mod appointment;
pub mod slot;


use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub use appointment::{
    FIXED_OCCUPANCY_MINUTES, appointment_conflicts, appointment_overlaps,
    has_appointment_conflict, has_appointment_overlap,
};
pub use slot::{has_slot_conflict, is_within_available_slot, slot_contains, slots_overlap};

/// A candidate `[start, end)` range of absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// ## Errors
    /// Returns `CoreError::InvalidAppointment` unless `start` is strictly before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CoreResult<Self> {
        if start >= end {
            return Err(CoreError::InvalidAppointment(
                "window start must be before its end".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// ## Errors
    /// Returns `CoreError::InvalidAppointment` if `length` is not positive or the window
    /// would end past the latest representable instant.
    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> CoreResult<Self> {
        let end = start.checked_add_signed(length).ok_or_else(|| {
            CoreError::InvalidAppointment("window ends past the representable range".to_string())
        })?;
        Self::new(start, end)
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// `at + length`, clamped to the latest representable instant.
pub(crate) fn saturating_end(at: DateTime<Utc>, length: Duration) -> DateTime<Utc> {
    at.checked_add_signed(length)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// How long an existing appointment is considered to keep its staff member busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyPolicy {
    /// Every appointment occupies 30 minutes, whatever its service. Conflicts are decided
    /// by [`appointment_conflicts`].
    #[default]
    FixedHalfHour,
    /// Every appointment occupies its service's duration. Conflicts are decided by
    /// [`appointment_overlaps`].
    ServiceDuration,
}
