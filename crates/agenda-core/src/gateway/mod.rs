//! Persistence gateway contracts.
//!
//! Storage backends implement the fetch/save primitives; the conflict and containment
//! queries are provided methods that run the [`crate::schedule`] predicates over what the
//! backend returns, so every backend answers them with identical semantics.

pub mod memory;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::error::GatewayResult;
use crate::model::{Appointment, AvailableSlot, Service, User};
use crate::schedule::{self, TimeWindow};
use crate::types::{Email, Weekday};

#[async_trait]
pub trait AppointmentGateway: Send + Sync {
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<Appointment>>;

    async fn find_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<Appointment>>;

    /// Appointments of `staff_id` whose status is `scheduled`.
    async fn find_scheduled_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<Appointment>> {
        let mut appointments = self.find_by_staff(staff_id).await?;
        appointments.retain(Appointment::is_scheduled);
        Ok(appointments)
    }

    /// ## Summary
    /// Returns true if a scheduled appointment of `staff_id` conflicts with `window`
    /// under the fixed 30-minute occupancy rule.
    ///
    /// ## Errors
    /// Propagates the backend's fetch failure.
    async fn has_conflict(&self, staff_id: i64, window: TimeWindow) -> GatewayResult<bool> {
        let appointments = self.find_scheduled_by_staff(staff_id).await?;
        Ok(schedule::has_appointment_conflict(&appointments, &window))
    }

    /// Persists a new appointment and assigns its identity.
    async fn save(&self, appointment: &mut Appointment) -> GatewayResult<()>;

    /// Persists the status of an already stored appointment.
    async fn update(&self, appointment: &Appointment) -> GatewayResult<()>;

    async fn delete(&self, id: i64) -> GatewayResult<()>;
}

#[async_trait]
pub trait AvailableSlotGateway: Send + Sync {
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<AvailableSlot>>;

    async fn find_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<AvailableSlot>>;

    async fn find_by_staff_and_weekday(
        &self,
        staff_id: i64,
        weekday: Weekday,
    ) -> GatewayResult<Vec<AvailableSlot>>;

    /// Slots of `staff_id` recurring on the weekday of `date`.
    async fn find_by_staff_and_date(
        &self,
        staff_id: i64,
        date: NaiveDate,
    ) -> GatewayResult<Vec<AvailableSlot>> {
        self.find_by_staff_and_weekday(staff_id, Weekday::of_date(date))
            .await
    }

    /// ## Summary
    /// Returns true if one of `staff_id`'s slots on the weekday of `window.start()` covers
    /// the whole window.
    ///
    /// ## Errors
    /// Propagates the backend's fetch failure.
    async fn is_within_available_slot(
        &self,
        staff_id: i64,
        window: TimeWindow,
    ) -> GatewayResult<bool> {
        let slots = self
            .find_by_staff_and_weekday(staff_id, Weekday::of(window.start()))
            .await?;
        Ok(schedule::is_within_available_slot(&slots, &window))
    }

    /// ## Summary
    /// Returns true if the candidate range collides with an existing slot of `staff_id`
    /// on `weekday`.
    ///
    /// ## Errors
    /// Propagates the backend's fetch failure.
    async fn has_conflict(
        &self,
        staff_id: i64,
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> GatewayResult<bool> {
        let slots = self.find_by_staff_and_weekday(staff_id, weekday).await?;
        Ok(schedule::has_slot_conflict(&slots, weekday, start, end))
    }

    /// Persists a new slot and assigns its identity.
    async fn save(&self, slot: &mut AvailableSlot) -> GatewayResult<()>;

    async fn update(&self, slot: &AvailableSlot) -> GatewayResult<()>;

    async fn delete(&self, id: i64) -> GatewayResult<()>;
}

#[async_trait]
pub trait ServiceGateway: Send + Sync {
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<Service>>;

    async fn find_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<Service>>;

    async fn exists(&self, id: i64) -> GatewayResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Persists a new service and assigns its identity.
    async fn save(&self, service: &mut Service) -> GatewayResult<()>;

    /// Persists the duration and price of an already stored service.
    async fn update(&self, service: &Service) -> GatewayResult<()>;
}

#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> GatewayResult<Option<User>>;

    async fn exists(&self, id: i64) -> GatewayResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn email_exists(&self, email: &Email) -> GatewayResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Persists a new user and assigns its identity.
    async fn save(&self, user: &mut User) -> GatewayResult<()>;
}
