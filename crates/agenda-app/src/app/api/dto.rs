//! JSON request and response bodies.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use agenda_core::model::{Appointment, AvailableSlot, Service, User};
use agenda_core::types::{AppointmentStatus, Role, Weekday};
use agenda_service::booking::{BookAppointment, CreateService, RegisterSlot, UpdateService};
use agenda_service::user::RegisterUser;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct BookAppointmentRequest {
    pub client_id: i64,
    pub staff_id: i64,
    pub service_id: i64,
    pub scheduled_at: DateTime<Utc>,
}

impl From<BookAppointmentRequest> for BookAppointment {
    fn from(body: BookAppointmentRequest) -> Self {
        Self {
            client_id: body.client_id,
            staff_id: body.staff_id,
            service_id: body.service_id,
            scheduled_at: body.scheduled_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub id: Option<i64>,
    pub client_id: i64,
    pub staff_id: i64,
    pub service_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Appointment> for AppointmentResponse {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id(),
            client_id: appointment.client_id(),
            staff_id: appointment.staff_id(),
            service_id: appointment.service_id(),
            scheduled_at: appointment.scheduled_at(),
            status: appointment.status(),
            created_at: appointment.created_at(),
        }
    }
}

/// Slot registration body; the staff member comes from the path.
#[derive(Debug, Deserialize)]
pub struct RegisterSlotRequest {
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl RegisterSlotRequest {
    #[must_use]
    pub const fn for_staff(self, staff_id: i64) -> RegisterSlot {
        RegisterSlot {
            staff_id,
            weekday: self.weekday,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub id: Option<i64>,
    pub staff_id: i64,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<&AvailableSlot> for SlotResponse {
    fn from(slot: &AvailableSlot) -> Self {
        Self {
            id: slot.id(),
            staff_id: slot.staff_id(),
            weekday: slot.weekday(),
            start_time: slot.start_time(),
            end_time: slot.end_time(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    pub staff_id: i64,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
}

impl From<CreateServiceRequest> for CreateService {
    fn from(body: CreateServiceRequest) -> Self {
        Self {
            staff_id: body.staff_id,
            name: body.name,
            duration_minutes: body.duration_minutes,
            price_cents: body.price_cents,
        }
    }
}

/// Partial service update; omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateServiceRequest {
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
}

impl From<UpdateServiceRequest> for UpdateService {
    fn from(body: UpdateServiceRequest) -> Self {
        Self {
            duration_minutes: body.duration_minutes,
            price_cents: body.price_cents,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub id: Option<i64>,
    pub staff_id: i64,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Service> for ServiceResponse {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id(),
            staff_id: service.staff_id(),
            name: service.name().to_string(),
            duration_minutes: service.duration_minutes(),
            price_cents: service.price_cents(),
            created_at: service.created_at(),
        }
    }
}

/// Registration body. The role defaults to `client`.
#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl From<RegisterUserRequest> for RegisterUser {
    fn from(body: RegisterUserRequest) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            role: body.role,
        }
    }
}

/// A user as returned to clients; the password hash is never exposed.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            created_at: user.created_at(),
        }
    }
}
