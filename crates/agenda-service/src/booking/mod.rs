//! Booking orchestration.
//!
//! Every check-then-insert sequence (booking an appointment, registering a slot) runs under
//! the staff member's [`StaffLocks`] entry, so two concurrent requests for the same staff
//! member are decided one after the other.

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use agenda_core::clock::Clock;
use agenda_core::error::CoreError;
use agenda_core::gateway::{AppointmentGateway, AvailableSlotGateway, ServiceGateway};
use agenda_core::model::{Appointment, AvailableSlot, Service};
use agenda_core::schedule::{self, OccupancyPolicy, TimeWindow};
use agenda_core::types::Weekday;

use crate::error::{ServiceError, ServiceResult};
use crate::locks::StaffLocks;
use crate::outcome::{Outcome, Rejection};

/// Request to book an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookAppointment {
    pub client_id: i64,
    pub staff_id: i64,
    pub service_id: i64,
    pub scheduled_at: DateTime<Utc>,
}

/// Request to declare a recurring availability window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSlot {
    pub staff_id: i64,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Request to offer a new service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateService {
    pub staff_id: i64,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
}

/// Changes to an offered service; absent fields stay as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateService {
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
}

pub struct BookingService {
    appointments: Arc<dyn AppointmentGateway>,
    slots: Arc<dyn AvailableSlotGateway>,
    services: Arc<dyn ServiceGateway>,
    clock: Arc<dyn Clock>,
    occupancy: OccupancyPolicy,
    locks: StaffLocks,
}

impl BookingService {
    #[must_use]
    pub fn new(
        appointments: Arc<dyn AppointmentGateway>,
        slots: Arc<dyn AvailableSlotGateway>,
        services: Arc<dyn ServiceGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            slots,
            services,
            clock,
            occupancy: OccupancyPolicy::default(),
            locks: StaffLocks::new(),
        }
    }

    /// Builds the service over a single store implementing every gateway.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: AppointmentGateway + AvailableSlotGateway + ServiceGateway + 'static,
    {
        Self::new(store.clone(), store.clone(), store, clock)
    }

    #[must_use]
    pub fn with_occupancy(mut self, occupancy: OccupancyPolicy) -> Self {
        self.occupancy = occupancy;
        self
    }

    #[must_use]
    pub const fn occupancy(&self) -> OccupancyPolicy {
        self.occupancy
    }

    /// ## Summary
    /// Books an appointment if the staff member is available for the whole service
    /// duration and no scheduled appointment is in the way.
    ///
    /// The requested window is `[scheduled_at, scheduled_at + service duration)`.
    /// Containment is checked first; a window outside availability is rejected without
    /// looking at existing appointments.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` for an invalid request or a service offered by
    /// another staff member, `ServiceError::NotFound` if the service does not exist, and
    /// propagates gateway failures.
    #[tracing::instrument(skip(self), fields(
        staff_id = request.staff_id,
        service_id = request.service_id,
        scheduled_at = %request.scheduled_at,
    ))]
    pub async fn book(&self, request: BookAppointment) -> ServiceResult<Outcome<Appointment>> {
        let mut appointment = Appointment::new(
            self.clock.as_ref(),
            request.client_id,
            request.staff_id,
            request.service_id,
            request.scheduled_at,
        )?;

        let service = self
            .services
            .find_by_id(request.service_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("service {}", request.service_id)))?;

        if service.staff_id() != request.staff_id {
            return Err(CoreError::InvalidAppointment(
                "service is not offered by this staff member".to_string(),
            )
            .into());
        }

        let window = TimeWindow::starting_at(appointment.scheduled_at(), service.duration())?;

        let _guard = self.locks.acquire(request.staff_id).await;

        if !self
            .slots
            .is_within_available_slot(request.staff_id, window)
            .await?
        {
            tracing::info!("Booking rejected: outside availability");
            return Ok(Outcome::Rejected(Rejection::OutsideAvailability));
        }

        if self.has_appointment_conflict(request.staff_id, window).await? {
            tracing::info!("Booking rejected: appointment conflict");
            return Ok(Outcome::Rejected(Rejection::AppointmentConflict));
        }

        self.appointments.save(&mut appointment).await?;
        tracing::info!(appointment_id = ?appointment.id(), "Appointment booked");

        Ok(Outcome::Accepted(appointment))
    }

    async fn has_appointment_conflict(
        &self,
        staff_id: i64,
        window: TimeWindow,
    ) -> ServiceResult<bool> {
        match self.occupancy {
            OccupancyPolicy::FixedHalfHour => {
                Ok(self.appointments.has_conflict(staff_id, window).await?)
            }
            OccupancyPolicy::ServiceDuration => {
                let existing = self.appointments.find_scheduled_by_staff(staff_id).await?;
                let durations: HashMap<i64, chrono::Duration> = self
                    .services
                    .find_by_staff(staff_id)
                    .await?
                    .iter()
                    .filter_map(|service| service.id().map(|id| (id, service.duration())))
                    .collect();

                Ok(schedule::has_appointment_overlap(
                    &existing,
                    &window,
                    |appointment| durations.get(&appointment.service_id()).copied(),
                ))
            }
        }
    }

    /// ## Summary
    /// Marks an appointment as cancelled. Cancelling twice is harmless.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if the appointment does not exist and propagates
    /// gateway failures.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, appointment_id: i64) -> ServiceResult<Appointment> {
        let mut appointment = self.load_appointment(appointment_id).await?;
        appointment.cancel();
        self.appointments.update(&appointment).await?;

        tracing::info!("Appointment cancelled");
        Ok(appointment)
    }

    /// ## Summary
    /// Marks an appointment as completed, whatever its current status.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if the appointment does not exist and propagates
    /// gateway failures.
    #[tracing::instrument(skip(self))]
    pub async fn complete(&self, appointment_id: i64) -> ServiceResult<Appointment> {
        let mut appointment = self.load_appointment(appointment_id).await?;
        appointment.complete();
        self.appointments.update(&appointment).await?;

        tracing::info!("Appointment completed");
        Ok(appointment)
    }

    async fn load_appointment(&self, appointment_id: i64) -> ServiceResult<Appointment> {
        self.appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("appointment {appointment_id}")))
    }

    /// ## Errors
    /// Propagates gateway failures.
    #[tracing::instrument(skip(self))]
    pub async fn appointments_for_staff(&self, staff_id: i64) -> ServiceResult<Vec<Appointment>> {
        Ok(self.appointments.find_by_staff(staff_id).await?)
    }

    /// ## Summary
    /// Declares a recurring availability window unless it overlaps one the staff member
    /// already has on that weekday. Adjacent windows are accepted.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` for an invalid slot and propagates gateway
    /// failures.
    #[tracing::instrument(skip(self), fields(
        staff_id = request.staff_id,
        weekday = %request.weekday,
    ))]
    pub async fn register_slot(&self, request: RegisterSlot) -> ServiceResult<Outcome<AvailableSlot>> {
        let mut slot = AvailableSlot::new(
            request.staff_id,
            request.weekday,
            request.start_time,
            request.end_time,
        )?;

        let _guard = self.locks.acquire(request.staff_id).await;

        if self
            .slots
            .has_conflict(
                request.staff_id,
                request.weekday,
                request.start_time,
                request.end_time,
            )
            .await?
        {
            tracing::info!("Slot rejected: overlaps an existing slot");
            return Ok(Outcome::Rejected(Rejection::SlotConflict));
        }

        self.slots.save(&mut slot).await?;
        tracing::info!(slot_id = ?slot.id(), "Slot registered");

        Ok(Outcome::Accepted(slot))
    }

    /// ## Errors
    /// Propagates gateway failures.
    #[tracing::instrument(skip(self))]
    pub async fn slots_for_staff(&self, staff_id: i64) -> ServiceResult<Vec<AvailableSlot>> {
        Ok(self.slots.find_by_staff(staff_id).await?)
    }

    /// Slots of `staff_id` that recur on the weekday of `date`.
    ///
    /// ## Errors
    /// Propagates gateway failures.
    #[tracing::instrument(skip(self))]
    pub async fn slots_for_date(
        &self,
        staff_id: i64,
        date: NaiveDate,
    ) -> ServiceResult<Vec<AvailableSlot>> {
        Ok(self.slots.find_by_staff_and_date(staff_id, date).await?)
    }

    /// ## Errors
    /// Returns a not-found gateway error if the slot does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn remove_slot(&self, slot_id: i64) -> ServiceResult<()> {
        self.slots.delete(slot_id).await?;
        tracing::info!("Slot removed");
        Ok(())
    }

    /// ## Errors
    /// Returns `ServiceError::CoreError` for an invalid service and propagates gateway
    /// failures.
    #[tracing::instrument(skip(self, request), fields(staff_id = request.staff_id, name = %request.name))]
    pub async fn create_service(&self, request: CreateService) -> ServiceResult<Service> {
        let mut service = Service::new(
            self.clock.as_ref(),
            request.staff_id,
            request.name,
            request.duration_minutes,
            request.price_cents,
        )?;

        self.services.save(&mut service).await?;
        tracing::info!(service_id = ?service.id(), "Service created");

        Ok(service)
    }

    /// ## Summary
    /// Changes the duration and/or price of a service.
    ///
    /// A new duration also changes how long existing appointments for the service keep
    /// the staff member busy under [`OccupancyPolicy::ServiceDuration`].
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if the service does not exist,
    /// `ServiceError::CoreError` for a non-positive duration or a negative price, and
    /// propagates gateway failures.
    #[tracing::instrument(skip(self))]
    pub async fn update_service(
        &self,
        service_id: i64,
        changes: UpdateService,
    ) -> ServiceResult<Service> {
        let mut service = self
            .services
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("service {service_id}")))?;

        if let Some(duration_minutes) = changes.duration_minutes {
            service.change_duration(duration_minutes)?;
        }
        if let Some(price_cents) = changes.price_cents {
            service.change_price(price_cents)?;
        }

        self.services.update(&service).await?;
        tracing::info!("Service updated");

        Ok(service)
    }

    /// ## Errors
    /// Propagates gateway failures.
    #[tracing::instrument(skip(self))]
    pub async fn services_for_staff(&self, staff_id: i64) -> ServiceResult<Vec<Service>> {
        Ok(self.services.find_by_staff(staff_id).await?)
    }
}
