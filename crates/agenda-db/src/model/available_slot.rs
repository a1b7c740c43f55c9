use chrono::NaiveTime;
use diesel::{pg::Pg, prelude::*};

use agenda_core::model::AvailableSlot;

use crate::db::{enums::Weekday, schema};

/// Stored availability slot row
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::available_slot)]
#[diesel(check_for_backend(Pg))]
pub struct AvailableSlotRow {
    pub id: i64,
    pub staff_id: i64,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Insert struct for new availability slots
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::available_slot)]
pub struct NewAvailableSlot {
    pub staff_id: i64,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Changeset for the mutable columns of a slot
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::available_slot)]
pub struct AvailableSlotChanges {
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<&AvailableSlot> for NewAvailableSlot {
    fn from(slot: &AvailableSlot) -> Self {
        Self {
            staff_id: slot.staff_id(),
            weekday: slot.weekday().into(),
            start_time: slot.start_time(),
            end_time: slot.end_time(),
        }
    }
}

impl From<&AvailableSlot> for AvailableSlotChanges {
    fn from(slot: &AvailableSlot) -> Self {
        Self {
            weekday: slot.weekday().into(),
            start_time: slot.start_time(),
            end_time: slot.end_time(),
        }
    }
}

impl From<AvailableSlotRow> for AvailableSlot {
    fn from(row: AvailableSlotRow) -> Self {
        Self::rehydrate(
            row.id,
            row.staff_id,
            row.weekday.into(),
            row.start_time,
            row.end_time,
        )
    }
}
