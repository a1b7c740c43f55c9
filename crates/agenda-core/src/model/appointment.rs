use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::types::AppointmentStatus;

/// One concrete booking of a service with a staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    id: Option<i64>,
    client_id: i64,
    staff_id: i64,
    service_id: i64,
    scheduled_at: DateTime<Utc>,
    status: AppointmentStatus,
    created_at: DateTime<Utc>,
}

/// Trusted field set loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRecord {
    pub id: i64,
    pub client_id: i64,
    pub staff_id: i64,
    pub service_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// ## Summary
    /// Creates a new scheduled appointment, stamped with the clock's current instant.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidAppointment` if any of the ids is zero or if
    /// `scheduled_at` lies strictly before the current instant.
    pub fn new(
        clock: &dyn Clock,
        client_id: i64,
        staff_id: i64,
        service_id: i64,
        scheduled_at: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if client_id == 0 || staff_id == 0 || service_id == 0 {
            return Err(CoreError::InvalidAppointment(
                "client, professional and service are required".to_string(),
            ));
        }

        let now = clock.now();
        if scheduled_at < now {
            return Err(CoreError::InvalidAppointment(
                "cannot schedule in the past".to_string(),
            ));
        }

        Ok(Self {
            id: None,
            client_id,
            staff_id,
            service_id,
            scheduled_at,
            status: AppointmentStatus::Scheduled,
            created_at: now,
        })
    }

    /// ## Summary
    /// Rebuilds an appointment from a stored row without re-running the creation checks.
    ///
    /// Stored rows may predate the current rules (an appointment in the past is normal here).
    #[must_use]
    pub fn rehydrate(record: AppointmentRecord) -> Self {
        Self {
            id: Some(record.id),
            client_id: record.client_id,
            staff_id: record.staff_id,
            service_id: record.service_id,
            scheduled_at: record.scheduled_at,
            status: record.status,
            created_at: record.created_at,
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
                "appointment identity already assigned",
            ));
        }
        self.id = Some(id);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.status = AppointmentStatus::Cancelled;
    }

    /// Marks the appointment completed. No transition guard: a cancelled appointment
    /// is overwritten as well.
    pub fn complete(&mut self) {
        self.status = AppointmentStatus::Completed;
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == AppointmentStatus::Completed
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub const fn client_id(&self) -> i64 {
        self.client_id
    }

    #[must_use]
    pub const fn staff_id(&self) -> i64 {
        self.staff_id
    }

    #[must_use]
    pub const fn service_id(&self) -> i64 {
        self.service_id
    }

    #[must_use]
    pub const fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }

    #[must_use]
    pub const fn status(&self) -> AppointmentStatus {
        self.status
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
