//! Query builder functions for services.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::service;
use crate::model::service::{NewService, ServiceChanges, ServiceRow};

#[must_use]
pub fn all() -> service::BoxedQuery<'static, diesel::pg::Pg> {
    service::table.into_boxed()
}

#[must_use]
pub fn by_id(id: i64) -> service::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(service::id.eq(id))
}

#[must_use]
pub fn by_staff(staff_id: i64) -> service::BoxedQuery<'static, diesel::pg::Pg> {
    all()
        .filter(service::staff_id.eq(staff_id))
        .order(service::name.asc())
}

/// ## Summary
/// Inserts a new service and returns the stored row.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_service(
    conn: &mut DbConnection<'_>,
    new_service: &NewService<'_>,
) -> diesel::QueryResult<ServiceRow> {
    diesel::insert_into(service::table)
        .values(new_service)
        .returning(ServiceRow::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Updates the duration and price of a service.
///
/// ## Returns
/// The number of rows updated (0 if the service does not exist).
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_service(
    conn: &mut DbConnection<'_>,
    id: i64,
    changes: &ServiceChanges,
) -> diesel::QueryResult<usize> {
    diesel::update(service::table.filter(service::id.eq(id)))
        .set(changes)
        .execute(conn)
        .await
}
