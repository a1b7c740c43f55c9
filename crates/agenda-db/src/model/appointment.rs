use diesel::{pg::Pg, prelude::*};

use agenda_core::model::{Appointment, AppointmentRecord};

use crate::db::{enums::AppointmentStatus, schema};

/// Stored appointment row
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::appointment)]
#[diesel(check_for_backend(Pg))]
pub struct AppointmentRow {
    pub id: i64,
    pub client_id: i64,
    pub staff_id: i64,
    pub service_id: i64,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub status: AppointmentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Insert struct for new appointments
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::appointment)]
pub struct NewAppointment {
    pub client_id: i64,
    pub staff_id: i64,
    pub service_id: i64,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub status: AppointmentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Appointment> for NewAppointment {
    fn from(appointment: &Appointment) -> Self {
        Self {
            client_id: appointment.client_id(),
            staff_id: appointment.staff_id(),
            service_id: appointment.service_id(),
            scheduled_at: appointment.scheduled_at(),
            status: appointment.status().into(),
            created_at: appointment.created_at(),
        }
    }
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Self::rehydrate(AppointmentRecord {
            id: row.id,
            client_id: row.client_id,
            staff_id: row.staff_id,
            service_id: row.service_id,
            scheduled_at: row.scheduled_at,
            status: row.status.into(),
            created_at: row.created_at,
        })
    }
}
