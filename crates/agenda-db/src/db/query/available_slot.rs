//! Query builder functions for availability slots.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::enums::Weekday;
use crate::db::schema::available_slot;
use crate::model::available_slot::{AvailableSlotChanges, AvailableSlotRow, NewAvailableSlot};

/// ## Summary
/// Returns a query to select all slots.
#[must_use]
pub fn all() -> available_slot::BoxedQuery<'static, diesel::pg::Pg> {
    available_slot::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a slot by ID.
#[must_use]
pub fn by_id(id: i64) -> available_slot::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(available_slot::id.eq(id))
}

/// ## Summary
/// Returns a query to find a staff member's slots in creation order.
#[must_use]
pub fn by_staff(staff_id: i64) -> available_slot::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(available_slot::staff_id.eq(staff_id))
        .order(available_slot::id.asc())
}

/// ## Summary
/// Returns a query to find a staff member's slots recurring on one weekday.
#[must_use]
pub fn by_staff_and_weekday(
    staff_id: i64,
    weekday: Weekday,
) -> available_slot::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(available_slot::staff_id.eq(staff_id))
        .filter(available_slot::weekday.eq(weekday))
        .order(available_slot::start_time.asc())
}

/// ## Summary
/// Inserts a new slot and returns the stored row.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_slot(
    conn: &mut DbConnection<'_>,
    new_slot: &NewAvailableSlot,
) -> diesel::QueryResult<AvailableSlotRow> {
    diesel::insert_into(available_slot::table)
        .values(new_slot)
        .returning(AvailableSlotRow::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Updates the weekday and time range of a slot.
///
/// ## Returns
/// The number of rows updated (0 if the slot does not exist).
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_slot(
    conn: &mut DbConnection<'_>,
    id: i64,
    changes: &AvailableSlotChanges,
) -> diesel::QueryResult<usize> {
    diesel::update(available_slot::table.filter(available_slot::id.eq(id)))
        .set(changes)
        .execute(conn)
        .await
}

/// ## Summary
/// Deletes a slot.
///
/// ## Returns
/// The number of rows deleted.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_slot(conn: &mut DbConnection<'_>, id: i64) -> diesel::QueryResult<usize> {
    diesel::delete(available_slot::table.filter(available_slot::id.eq(id)))
        .execute(conn)
        .await
}
