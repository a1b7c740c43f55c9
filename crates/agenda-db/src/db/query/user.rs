//! Query builder functions for users.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::app_user;
use crate::model::user::{NewUser, UserRow};

#[must_use]
pub fn all() -> app_user::BoxedQuery<'static, diesel::pg::Pg> {
    app_user::table.into_boxed()
}

#[must_use]
pub fn by_id(id: i64) -> app_user::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(app_user::id.eq(id))
}

#[must_use]
pub fn by_email(email: &str) -> app_user::BoxedQuery<'_, diesel::pg::Pg> {
    all().filter(app_user::email.eq(email))
}

/// ## Summary
/// Inserts a new user and returns the stored row.
///
/// ## Errors
/// Returns a database error if the insert fails, including a unique violation when the
/// e-mail address is already registered.
pub async fn create_user(
    conn: &mut DbConnection<'_>,
    new_user: &NewUser<'_>,
) -> diesel::QueryResult<UserRow> {
    diesel::insert_into(app_user::table)
        .values(new_user)
        .returning(UserRow::as_returning())
        .get_result(conn)
        .await
}
