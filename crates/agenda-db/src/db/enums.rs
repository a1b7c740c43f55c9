//! Database enum types with Diesel serialization.
//!
//! This module provides type-safe enum wrappers for database CHECK constraints.
//! Each enum implements `ToSql` and `FromSql` for automatic conversion between Rust and `PostgreSQL`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

/// Appointment lifecycle status.
///
/// Maps to `appointment.status` CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl ToSql<Text, Pg> for AppointmentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for AppointmentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"scheduled" => Ok(Self::Scheduled),
            b"completed" => Ok(Self::Completed),
            b"cancelled" => Ok(Self::Cancelled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl AppointmentStatus {
    /// Returns the database string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AppointmentStatus> for agenda_core::types::AppointmentStatus {
    fn from(db_status: AppointmentStatus) -> Self {
        match db_status {
            AppointmentStatus::Scheduled => Self::Scheduled,
            AppointmentStatus::Completed => Self::Completed,
            AppointmentStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<agenda_core::types::AppointmentStatus> for AppointmentStatus {
    fn from(core_status: agenda_core::types::AppointmentStatus) -> Self {
        match core_status {
            agenda_core::types::AppointmentStatus::Scheduled => Self::Scheduled,
            agenda_core::types::AppointmentStatus::Completed => Self::Completed,
            agenda_core::types::AppointmentStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Recurring weekday of an availability slot.
///
/// Maps to `available_slot.weekday` CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl ToSql<Text, Pg> for Weekday {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for Weekday {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"sunday" => Ok(Self::Sunday),
            b"monday" => Ok(Self::Monday),
            b"tuesday" => Ok(Self::Tuesday),
            b"wednesday" => Ok(Self::Wednesday),
            b"thursday" => Ok(Self::Thursday),
            b"friday" => Ok(Self::Friday),
            b"saturday" => Ok(Self::Saturday),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl Weekday {
    /// Returns the database string representation of this weekday.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Weekday> for agenda_core::types::Weekday {
    fn from(db_day: Weekday) -> Self {
        match db_day {
            Weekday::Sunday => Self::Sunday,
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
        }
    }
}

impl From<agenda_core::types::Weekday> for Weekday {
    fn from(core_day: agenda_core::types::Weekday) -> Self {
        match core_day {
            agenda_core::types::Weekday::Sunday => Self::Sunday,
            agenda_core::types::Weekday::Monday => Self::Monday,
            agenda_core::types::Weekday::Tuesday => Self::Tuesday,
            agenda_core::types::Weekday::Wednesday => Self::Wednesday,
            agenda_core::types::Weekday::Thursday => Self::Thursday,
            agenda_core::types::Weekday::Friday => Self::Friday,
            agenda_core::types::Weekday::Saturday => Self::Saturday,
        }
    }
}

/// Role of a registered user.
///
/// Maps to `app_user.role` CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum UserRole {
    Client,
    Admin,
}

impl ToSql<Text, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for UserRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"client" => Ok(Self::Client),
            b"admin" => Ok(Self::Admin),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }
}

impl From<UserRole> for agenda_core::types::Role {
    fn from(db_role: UserRole) -> Self {
        match db_role {
            UserRole::Client => Self::Client,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<agenda_core::types::Role> for UserRole {
    fn from(core_role: agenda_core::types::Role) -> Self {
        match core_role {
            agenda_core::types::Role::Client => Self::Client,
            agenda_core::types::Role::Admin => Self::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_literals_match_core() {
        for core_day in agenda_core::types::Weekday::ALL {
            let db_day = Weekday::from(core_day);
            assert_eq!(db_day.as_str(), core_day.as_str());
            assert_eq!(agenda_core::types::Weekday::from(db_day), core_day);
        }
    }

    #[test]
    fn status_literals_match_core() {
        for db_status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            let core_status = agenda_core::types::AppointmentStatus::from(db_status);
            assert_eq!(db_status.as_str(), core_status.as_str());
        }
    }

    #[test]
    fn role_literals_match_core() {
        for db_role in [UserRole::Client, UserRole::Admin] {
            let core_role = agenda_core::types::Role::from(db_role);
            assert_eq!(db_role.as_str(), core_role.as_str());
            assert_eq!(UserRole::from(core_role), db_role);
        }
    }
}
