//! Appointment-versus-window conflict checks.
//!
//! The default rule assumes a fixed 30-minute occupancy for every existing appointment and
//! tests it with closed intervals:
//!
//! ```text
//! existing.scheduled_at in [window.start, window.end]
//!     OR window.end in [existing.scheduled_at, existing.scheduled_at + 30min]
//! ```
//!
//! This is an approximation, not an interval intersection: a window that starts inside an
//! existing appointment's half hour but ends after it is not reported. The duration-aware
//! alternative is [`appointment_overlaps`].

use chrono::Duration;

use super::{TimeWindow, saturating_end};
use crate::model::Appointment;

pub const FIXED_OCCUPANCY_MINUTES: i64 = 30;

/// ## Summary
/// Fixed-occupancy conflict test between one existing appointment and a candidate window.
///
/// Only scheduled appointments can conflict.
#[must_use]
pub fn appointment_conflicts(existing: &Appointment, window: &TimeWindow) -> bool {
    if !existing.is_scheduled() {
        return false;
    }

    let at = existing.scheduled_at();
    let occupied_until = saturating_end(at, Duration::minutes(FIXED_OCCUPANCY_MINUTES));

    (window.start() <= at && at <= window.end())
        || (at <= window.end() && window.end() <= occupied_until)
}

/// Returns true if any scheduled appointment conflicts with `window` under the fixed rule.
#[must_use]
pub fn has_appointment_conflict<'a, I>(appointments: I, window: &TimeWindow) -> bool
where
    I: IntoIterator<Item = &'a Appointment>,
{
    appointments
        .into_iter()
        .any(|existing| appointment_conflicts(existing, window))
}

/// ## Summary
/// Half-open interval overlap between an existing appointment occupying `occupied_for`
/// and a candidate window.
///
/// Only scheduled appointments can overlap; touching boundaries do not.
#[must_use]
pub fn appointment_overlaps(
    existing: &Appointment,
    occupied_for: Duration,
    window: &TimeWindow,
) -> bool {
    if !existing.is_scheduled() {
        return false;
    }

    let start = existing.scheduled_at();
    let end = saturating_end(start, occupied_for);

    start < window.end() && end > window.start()
}

/// ## Summary
/// Duration-aware variant of [`has_appointment_conflict`].
///
/// `occupancy` resolves how long each existing appointment lasts; appointments it
/// cannot resolve fall back to the fixed 30 minutes.
#[must_use]
pub fn has_appointment_overlap<'a, I, F>(appointments: I, window: &TimeWindow, occupancy: F) -> bool
where
    I: IntoIterator<Item = &'a Appointment>,
    F: Fn(&Appointment) -> Option<Duration>,
{
    appointments.into_iter().any(|existing| {
        let occupied_for = occupancy(existing)
            .unwrap_or_else(|| Duration::minutes(FIXED_OCCUPANCY_MINUTES));
        appointment_overlaps(existing, occupied_for, window)
    })
}
