//! `PostgreSQL` implementation of the persistence gateways.
//!
//! Rows are turned into entities through the rehydration path. The conflict and
//! containment predicates are inherited from the gateway traits; this store only narrows
//! the fetches in SQL (by staff, status and weekday).

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use agenda_core::error::{CoreError, GatewayError, GatewayResult};
use agenda_core::gateway::{AppointmentGateway, AvailableSlotGateway, ServiceGateway, UserGateway};
use agenda_core::model::{Appointment, AvailableSlot, Service, User};
use agenda_core::types::{Email, Weekday};

use crate::db::DbProvider;
use crate::db::connection::DbPool;
use crate::db::query;
use crate::error::DbError;
use crate::model::appointment::{AppointmentRow, NewAppointment};
use crate::model::available_slot::{AvailableSlotChanges, AvailableSlotRow, NewAvailableSlot};
use crate::model::service::{NewService, ServiceChanges, ServiceRow};
use crate::model::user::{NewUser, UserRow};

pub struct PgStore<P = DbPool> {
    provider: P,
}

impl<P: DbProvider> PgStore<P> {
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

/// Rejects inserting an entity that already carries an identity, before any row is written.
fn ensure_new(entity: &'static str, id: Option<i64>) -> GatewayResult<()> {
    if id.is_some() {
        tracing::error!(entity, ?id, "Attempted to insert an entity that already has an identity");
        return Err(GatewayError::Core(CoreError::InvariantViolation(
            "cannot save an entity that was already saved",
        )));
    }
    Ok(())
}

fn unsaved(entity: &'static str) -> GatewayError {
    tracing::error!(entity, "Attempted to update an entity without identity");
    GatewayError::Core(CoreError::InvariantViolation(
        "cannot update an entity that was never saved",
    ))
}

#[async_trait]
impl<P: DbProvider> AppointmentGateway for PgStore<P> {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<Appointment>> {
        let mut conn = self.provider.get_connection().await?;

        let row = query::appointment::by_id(id)
            .select(AppointmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbError::from)?;

        Ok(row.map(Appointment::from))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<Appointment>> {
        let mut conn = self.provider.get_connection().await?;

        let rows = query::appointment::by_staff(staff_id)
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(DbError::from)?;

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_scheduled_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<Appointment>> {
        let mut conn = self.provider.get_connection().await?;

        let rows = query::appointment::scheduled_by_staff(staff_id)
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(DbError::from)?;

        tracing::trace!(count = rows.len(), "Loaded scheduled appointments");

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    #[tracing::instrument(skip(self, appointment), fields(staff_id = appointment.staff_id()))]
    async fn save(&self, appointment: &mut Appointment) -> GatewayResult<()> {
        ensure_new("appointment", appointment.id())?;
        let mut conn = self.provider.get_connection().await?;

        let row =
            query::appointment::create_appointment(&mut conn, &NewAppointment::from(&*appointment))
                .await
                .map_err(DbError::from)?;

        appointment.assign_id(row.id)?;
        tracing::debug!(appointment_id = row.id, "Appointment stored");

        Ok(())
    }

    #[tracing::instrument(skip(self, appointment), fields(appointment_id = ?appointment.id()))]
    async fn update(&self, appointment: &Appointment) -> GatewayResult<()> {
        let id = appointment.id().ok_or_else(|| unsaved("appointment"))?;
        let mut conn = self.provider.get_connection().await?;

        let updated =
            query::appointment::update_status(&mut conn, id, appointment.status().into())
                .await
                .map_err(DbError::from)?;

        if updated == 0 {
            return Err(GatewayError::NotFound {
                entity: "appointment",
                id,
            });
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> GatewayResult<()> {
        let mut conn = self.provider.get_connection().await?;

        let deleted = query::appointment::delete_appointment(&mut conn, id)
            .await
            .map_err(DbError::from)?;

        if deleted == 0 {
            return Err(GatewayError::NotFound {
                entity: "appointment",
                id,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl<P: DbProvider> AvailableSlotGateway for PgStore<P> {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<AvailableSlot>> {
        let mut conn = self.provider.get_connection().await?;

        let row = query::available_slot::by_id(id)
            .select(AvailableSlotRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbError::from)?;

        Ok(row.map(AvailableSlot::from))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<AvailableSlot>> {
        let mut conn = self.provider.get_connection().await?;

        let rows = query::available_slot::by_staff(staff_id)
            .select(AvailableSlotRow::as_select())
            .load(&mut conn)
            .await
            .map_err(DbError::from)?;

        Ok(rows.into_iter().map(AvailableSlot::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_staff_and_weekday(
        &self,
        staff_id: i64,
        weekday: Weekday,
    ) -> GatewayResult<Vec<AvailableSlot>> {
        let mut conn = self.provider.get_connection().await?;

        let rows = query::available_slot::by_staff_and_weekday(staff_id, weekday.into())
            .select(AvailableSlotRow::as_select())
            .load(&mut conn)
            .await
            .map_err(DbError::from)?;

        Ok(rows.into_iter().map(AvailableSlot::from).collect())
    }

    #[tracing::instrument(skip(self, slot), fields(staff_id = slot.staff_id(), weekday = %slot.weekday()))]
    async fn save(&self, slot: &mut AvailableSlot) -> GatewayResult<()> {
        ensure_new("slot", slot.id())?;
        let mut conn = self.provider.get_connection().await?;

        let row = query::available_slot::create_slot(&mut conn, &NewAvailableSlot::from(&*slot))
            .await
            .map_err(DbError::from)?;

        slot.assign_id(row.id)?;
        tracing::debug!(slot_id = row.id, "Slot stored");

        Ok(())
    }

    #[tracing::instrument(skip(self, slot), fields(slot_id = ?slot.id()))]
    async fn update(&self, slot: &AvailableSlot) -> GatewayResult<()> {
        let id = slot.id().ok_or_else(|| unsaved("slot"))?;
        let mut conn = self.provider.get_connection().await?;

        let updated =
            query::available_slot::update_slot(&mut conn, id, &AvailableSlotChanges::from(slot))
                .await
                .map_err(DbError::from)?;

        if updated == 0 {
            return Err(GatewayError::NotFound { entity: "slot", id });
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> GatewayResult<()> {
        let mut conn = self.provider.get_connection().await?;

        let deleted = query::available_slot::delete_slot(&mut conn, id)
            .await
            .map_err(DbError::from)?;

        if deleted == 0 {
            return Err(GatewayError::NotFound { entity: "slot", id });
        }

        Ok(())
    }
}

#[async_trait]
impl<P: DbProvider> ServiceGateway for PgStore<P> {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<Service>> {
        let mut conn = self.provider.get_connection().await?;

        let row = query::service::by_id(id)
            .select(ServiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbError::from)?;

        Ok(row.map(Service::from))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_staff(&self, staff_id: i64) -> GatewayResult<Vec<Service>> {
        let mut conn = self.provider.get_connection().await?;

        let rows = query::service::by_staff(staff_id)
            .select(ServiceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(DbError::from)?;

        Ok(rows.into_iter().map(Service::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, id: i64) -> GatewayResult<bool> {
        let mut conn = self.provider.get_connection().await?;

        let found: i64 = query::service::by_id(id)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(DbError::from)?;

        Ok(found > 0)
    }

    #[tracing::instrument(skip(self, service), fields(staff_id = service.staff_id()))]
    async fn save(&self, service: &mut Service) -> GatewayResult<()> {
        ensure_new("service", service.id())?;
        let mut conn = self.provider.get_connection().await?;

        let row = query::service::create_service(&mut conn, &NewService::from(&*service))
            .await
            .map_err(DbError::from)?;

        service.assign_id(row.id)?;

        Ok(())
    }

    #[tracing::instrument(skip(self, service), fields(service_id = ?service.id()))]
    async fn update(&self, service: &Service) -> GatewayResult<()> {
        let id = service.id().ok_or_else(|| unsaved("service"))?;
        let mut conn = self.provider.get_connection().await?;

        let updated = query::service::update_service(&mut conn, id, &ServiceChanges::from(service))
            .await
            .map_err(DbError::from)?;

        if updated == 0 {
            return Err(GatewayError::NotFound {
                entity: "service",
                id,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl<P: DbProvider> UserGateway for PgStore<P> {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> GatewayResult<Option<User>> {
        let mut conn = self.provider.get_connection().await?;

        let row = query::user::by_id(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbError::from)?;

        Ok(row.map(User::from))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_email(&self, email: &Email) -> GatewayResult<Option<User>> {
        let mut conn = self.provider.get_connection().await?;

        let row = query::user::by_email(email.as_str())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbError::from)?;

        Ok(row.map(User::from))
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, id: i64) -> GatewayResult<bool> {
        let mut conn = self.provider.get_connection().await?;

        let found: i64 = query::user::by_id(id)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(DbError::from)?;

        Ok(found > 0)
    }

    #[tracing::instrument(skip(self, user), fields(role = %user.role()))]
    async fn save(&self, user: &mut User) -> GatewayResult<()> {
        ensure_new("user", user.id())?;
        let mut conn = self.provider.get_connection().await?;

        let row = match query::user::create_user(&mut conn, &NewUser::from(&*user)).await {
            Ok(row) => row,
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                return Err(GatewayError::Duplicate {
                    entity: "user",
                    field: "email",
                });
            }
            Err(err) => return Err(DbError::from(err).into()),
        };

        user.assign_id(row.id)?;
        tracing::debug!(user_id = row.id, "User stored");

        Ok(())
    }
}
