//! In-process gateway backed by plain collections.
//!
//! Used as the test double for the booking use case and as the `memory` storage backend
//! for local development. Identities are assigned from per-collection counters starting
//! at 1.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{AppointmentGateway, AvailableSlotGateway, ServiceGateway, UserGateway};
use crate::error::{CoreError, GatewayError, GatewayResult};
use crate::model::{Appointment, AvailableSlot, Service, User};
use crate::types::{Email, Weekday};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert(&mut self, row: T) -> i64 {
        self.last_id += 1;
        self.rows.insert(self.last_id, row);
        self.last_id
    }

    fn replace(&mut self, entity: &'static str, id: i64, row: T) -> GatewayResult<()> {
        match self.rows.get_mut(&id) {
            Some(existing) => {
                *existing = row;
                Ok(())
            }
            None => Err(GatewayError::NotFound { entity, id }),
        }
    }

    fn remove(&mut self, entity: &'static str, id: i64) -> GatewayResult<()> {
        self.rows
            .remove(&id)
            .map(|_removed| ())
            .ok_or(GatewayError::NotFound { entity, id })
    }

    fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Default)]
struct State {
    appointments: Table<Appointment>,
    slots: Table<AvailableSlot>,
    services: Table<Service>,
    users: Table<User>,
}

/// Thread-safe in-memory implementation of every gateway.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the state, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                self.state.clear_poison();
                poisoned.into_inner()
            }
        }
    }
}

#[async_trait]
impl AppointmentGateway for MemoryStore {
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<Appointment>> {
        Ok(self.lock().appointments.rows.get(&id).cloned())
    }

    async fn find_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<Appointment>> {
        Ok(self
            .lock()
            .appointments
            .select(|a| a.staff_id() == staff_id))
    }

    async fn save(&self, appointment: &mut Appointment) -> GatewayResult<()> {
        let mut state = self.lock();
        let id = state.appointments.last_id + 1;
        appointment.assign_id(id)?;
        state.appointments.insert(appointment.clone());
        tracing::trace!(appointment_id = id, "Stored appointment in memory");
        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> GatewayResult<()> {
        let id = appointment
            .id()
            .ok_or(GatewayError::Core(CoreError::InvariantViolation(
                "cannot update an appointment that was never saved",
            )))?;
        self.lock()
            .appointments
            .replace("appointment", id, appointment.clone())
    }

    async fn delete(&self, id: i64) -> GatewayResult<()> {
        self.lock().appointments.remove("appointment", id)
    }
}

#[async_trait]
impl AvailableSlotGateway for MemoryStore {
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<AvailableSlot>> {
        Ok(self.lock().slots.rows.get(&id).cloned())
    }

    async fn find_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<AvailableSlot>> {
        Ok(self.lock().slots.select(|s| s.staff_id() == staff_id))
    }

    async fn find_by_staff_and_weekday(
        &self,
        staff_id: i64,
        weekday: Weekday,
    ) -> GatewayResult<Vec<AvailableSlot>> {
        Ok(self
            .lock()
            .slots
            .select(|s| s.staff_id() == staff_id && s.weekday() == weekday))
    }

    async fn save(&self, slot: &mut AvailableSlot) -> GatewayResult<()> {
        let mut state = self.lock();
        let id = state.slots.last_id + 1;
        slot.assign_id(id)?;
        state.slots.insert(slot.clone());
        tracing::trace!(slot_id = id, "Stored slot in memory");
        Ok(())
    }

    async fn update(&self, slot: &AvailableSlot) -> GatewayResult<()> {
        let id = slot
            .id()
            .ok_or(GatewayError::Core(CoreError::InvariantViolation(
                "cannot update a slot that was never saved",
            )))?;
        self.lock().slots.replace("slot", id, slot.clone())
    }

    async fn delete(&self, id: i64) -> GatewayResult<()> {
        self.lock().slots.remove("slot", id)
    }
}

#[async_trait]
impl ServiceGateway for MemoryStore {
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<Service>> {
        Ok(self.lock().services.rows.get(&id).cloned())
    }

    async fn find_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<Service>> {
        Ok(self.lock().services.select(|s| s.staff_id() == staff_id))
    }

    async fn save(&self, service: &mut Service) -> GatewayResult<()> {
        let mut state = self.lock();
        let id = state.services.last_id + 1;
        service.assign_id(id)?;
        state.services.insert(service.clone());
        Ok(())
    }

    async fn update(&self, service: &Service) -> GatewayResult<()> {
        let id = service
            .id()
            .ok_or(GatewayError::Core(CoreError::InvariantViolation(
                "cannot update a service that was never saved",
            )))?;
        self.lock().services.replace("service", id, service.clone())
    }
}

#[async_trait]
impl UserGateway for MemoryStore {
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<User>> {
        Ok(self.lock().users.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> GatewayResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .select(|u| u.email() == email)
            .into_iter()
            .next())
    }

    async fn save(&self, user: &mut User) -> GatewayResult<()> {
        let mut state = self.lock();
        if state.users.rows.values().any(|u| u.email() == user.email()) {
            return Err(GatewayError::Duplicate {
                entity: "user",
                field: "email",
            });
        }
        let id = state.users.last_id + 1;
        user.assign_id(id)?;
        state.users.insert(user.clone());
        tracing::trace!(user_id = id, "Stored user in memory");
        Ok(())
    }
}
