use diesel::{pg::Pg, prelude::*};

use agenda_core::model::Service;

use crate::db::schema;

/// Stored service row
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::service)]
#[diesel(check_for_backend(Pg))]
pub struct ServiceRow {
    pub id: i64,
    pub staff_id: i64,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Insert struct for new services
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::service)]
pub struct NewService<'a> {
    pub staff_id: i64,
    pub name: &'a str,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Changeset for the mutable columns of a service
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::service)]
pub struct ServiceChanges {
    pub duration_minutes: i32,
    pub price_cents: i64,
}

impl From<&Service> for ServiceChanges {
    fn from(service: &Service) -> Self {
        Self {
            duration_minutes: service.duration_minutes(),
            price_cents: service.price_cents(),
        }
    }
}

impl<'a> From<&'a Service> for NewService<'a> {
    fn from(service: &'a Service) -> Self {
        Self {
            staff_id: service.staff_id(),
            name: service.name(),
            duration_minutes: service.duration_minutes(),
            price_cents: service.price_cents(),
            created_at: service.created_at(),
        }
    }
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self::rehydrate(
            row.id,
            row.staff_id,
            row.name,
            row.duration_minutes,
            row.price_cents,
            row.created_at,
        )
    }
}
