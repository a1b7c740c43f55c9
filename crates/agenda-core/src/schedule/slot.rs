//! Availability slot checks: window containment and slot-to-slot overlap.

use chrono::NaiveTime;

use super::TimeWindow;
use crate::model::AvailableSlot;
use crate::types::Weekday;

/// ## Summary
/// Returns true if `slot` covers the whole of `window`.
///
/// The window's weekday is taken from its start. Boundaries are inclusive on both sides.
/// A window ending on a later calendar date than it starts is never covered, since a
/// weekly slot cannot cross midnight.
#[must_use]
pub fn slot_contains(slot: &AvailableSlot, window: &TimeWindow) -> bool {
    let start = window.start();
    let end = window.end();

    if slot.weekday() != Weekday::of(start) || start.date_naive() != end.date_naive() {
        return false;
    }

    slot.start_time() <= start.time() && slot.end_time() >= end.time()
}

/// Returns true if at least one of `slots` covers `window`.
#[must_use]
pub fn is_within_available_slot<'a, I>(slots: I, window: &TimeWindow) -> bool
where
    I: IntoIterator<Item = &'a AvailableSlot>,
{
    slots.into_iter().any(|slot| slot_contains(slot, window))
}

/// ## Summary
/// Returns true if a candidate `[start, end)` time-of-day range collides with `existing`.
///
/// Half-open on both sides, so a candidate starting exactly at `existing.end_time()` or
/// ending exactly at `existing.start_time()` is adjacent, not overlapping. Callers are
/// expected to compare slots of the same staff member and weekday.
#[must_use]
pub fn slots_overlap(existing: &AvailableSlot, start: NaiveTime, end: NaiveTime) -> bool {
    (existing.start_time() < end && existing.end_time() > start)
        || (existing.start_time() <= start && start < existing.end_time())
}

/// Returns true if any slot on `weekday` collides with the candidate range.
#[must_use]
pub fn has_slot_conflict<'a, I>(slots: I, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> bool
where
    I: IntoIterator<Item = &'a AvailableSlot>,
{
    slots
        .into_iter()
        .filter(|slot| slot.weekday() == weekday)
        .any(|slot| slots_overlap(slot, start, end))
}
