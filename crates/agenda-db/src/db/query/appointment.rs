//! Query builder functions for appointments.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::enums::AppointmentStatus;
use crate::db::schema::appointment;
use crate::model::appointment::{AppointmentRow, NewAppointment};

/// ## Summary
/// Returns a query to select all appointments.
#[must_use]
pub fn all() -> appointment::BoxedQuery<'static, diesel::pg::Pg> {
    appointment::table.into_boxed()
}

/// ## Summary
/// Returns a query to find an appointment by ID.
#[must_use]
pub fn by_id(id: i64) -> appointment::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(appointment::id.eq(id))
}

/// ## Summary
/// Returns a query to find a staff member's appointments, earliest first.
#[must_use]
pub fn by_staff(staff_id: i64) -> appointment::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(appointment::staff_id.eq(staff_id))
        .order(appointment::scheduled_at.asc())
}

/// ## Summary
/// Returns a query to find a staff member's appointments that are still scheduled.
#[must_use]
pub fn scheduled_by_staff(staff_id: i64) -> appointment::BoxedQuery<'static, diesel::pg::Pg> {
    by_staff(staff_id).filter(appointment::status.eq(AppointmentStatus::Scheduled))
}

/// ## Summary
/// Inserts a new appointment and returns the stored row.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_appointment(
    conn: &mut DbConnection<'_>,
    new_appointment: &NewAppointment,
) -> diesel::QueryResult<AppointmentRow> {
    diesel::insert_into(appointment::table)
        .values(new_appointment)
        .returning(AppointmentRow::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Overwrites the status of an appointment.
///
/// ## Returns
/// The number of rows updated (0 if the appointment does not exist).
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_status(
    conn: &mut DbConnection<'_>,
    id: i64,
    status: AppointmentStatus,
) -> diesel::QueryResult<usize> {
    diesel::update(appointment::table.filter(appointment::id.eq(id)))
        .set(appointment::status.eq(status))
        .execute(conn)
        .await
}

/// ## Summary
/// Deletes an appointment.
///
/// ## Returns
/// The number of rows deleted.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_appointment(conn: &mut DbConnection<'_>, id: i64) -> diesel::QueryResult<usize> {
    diesel::delete(appointment::table.filter(appointment::id.eq(id)))
        .execute(conn)
        .await
}
