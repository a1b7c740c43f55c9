use diesel::{pg::Pg, prelude::*};

use agenda_core::model::User;
use agenda_core::types::Email;

use crate::db::{enums::UserRole, schema};

/// Stored user row
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::app_user)]
#[diesel(check_for_backend(Pg))]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Insert struct for new users
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::app_user)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> From<&'a User> for NewUser<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            name: user.name(),
            email: user.email().as_str(),
            password_hash: user.password_hash(),
            role: user.role().into(),
            created_at: user.created_at(),
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self::rehydrate(
            row.id,
            row.name,
            Email::rehydrate(row.email),
            row.password_hash,
            row.role.into(),
            row.created_at,
        )
    }
}
