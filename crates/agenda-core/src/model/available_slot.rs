use chrono::NaiveTime;

use crate::error::{CoreError, CoreResult};
use crate::types::Weekday;

/// A recurring weekly window during which one staff member accepts bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableSlot {
    id: Option<i64>,
    staff_id: i64,
    weekday: Weekday,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl AvailableSlot {
    /// ## Summary
    /// Creates a validated availability window.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidSlot` if `staff_id` is zero or if `start_time` is not
    /// strictly before `end_time`.
    pub fn new(
        staff_id: i64,
        weekday: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> CoreResult<Self> {
        if staff_id == 0 {
            return Err(CoreError::InvalidSlot("staff is required".to_string()));
        }
        if start_time >= end_time {
            return Err(CoreError::InvalidSlot(
                "start time must be before end time".to_string(),
            ));
        }

        Ok(Self {
            id: None,
            staff_id,
            weekday,
            start_time,
            end_time,
        })
    }

    /// ## Summary
    /// Rebuilds a slot from a stored row without validation.
    #[must_use]
    pub const fn rehydrate(
        id: i64,
        staff_id: i64,
        weekday: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: Some(id),
            staff_id,
            weekday,
            start_time,
            end_time,
        }
    }

    /// ## Summary
    /// Records the identity assigned by storage.
    ///
    /// ## Errors
    /// Returns `CoreError::InvariantViolation` if an identity was already assigned.
    pub fn assign_id(&mut self, id: i64) -> CoreResult<()> {
        if self.id.is_some() {
            return Err(CoreError::InvariantViolation(
                "slot identity already assigned",
            ));
        }
        self.id = Some(id);
        Ok(())
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub const fn staff_id(&self) -> i64 {
        self.staff_id
    }

    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    #[must_use]
    pub const fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    #[must_use]
    pub const fn end_time(&self) -> NaiveTime {
        self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn construction_succeeds_iff_invariants_hold() {
        let cases = [
            (7, hm(9, 0), hm(12, 0), true),
            (0, hm(9, 0), hm(12, 0), false),
            (7, hm(12, 0), hm(12, 0), false),
            (7, hm(13, 0), hm(12, 0), false),
            (-3, hm(0, 0), hm(0, 1), true),
        ];

        for day in Weekday::ALL {
            for (staff, start, end, ok) in cases {
                let result = AvailableSlot::new(staff, day, start, end);
                assert_eq!(result.is_ok(), ok, "staff={staff} {day} {start}-{end}");
            }
        }
    }

    #[test]
    fn rejection_messages_name_the_problem() {
        let err = AvailableSlot::new(0, Weekday::Monday, hm(9, 0), hm(10, 0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSlot(ref msg) if msg == "staff is required"));

        let err = AvailableSlot::new(1, Weekday::Monday, hm(10, 0), hm(9, 0)).unwrap_err();
        assert!(err.to_string().contains("start time must be before end time"));
    }

    #[test]
    fn identity_is_assigned_once() {
        let mut slot = AvailableSlot::new(7, Weekday::Friday, hm(9, 0), hm(17, 0)).unwrap();
        assert_eq!(slot.id(), None);
        slot.assign_id(11).unwrap();
        assert!(slot.assign_id(12).is_err());
        assert_eq!(slot.id(), Some(11));
    }
}
