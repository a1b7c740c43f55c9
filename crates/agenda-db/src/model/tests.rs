//! Tests for row and entity conversions

use chrono::{Duration, NaiveTime, TimeZone, Utc};

use agenda_core::clock::FixedClock;
use agenda_core::model::{Appointment, AvailableSlot, Service, User};

use super::appointment::{AppointmentRow, NewAppointment};
use super::available_slot::{AvailableSlotChanges, AvailableSlotRow, NewAvailableSlot};
use super::service::{NewService, ServiceRow};
use super::user::{NewUser, UserRow};
use crate::db::enums;

#[test]
fn appointment_row_rehydrates_past_rows() {
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    let row = AppointmentRow {
        id: 4,
        client_id: 1,
        staff_id: 7,
        service_id: 2,
        scheduled_at: now - Duration::days(10),
        status: enums::AppointmentStatus::Cancelled,
        created_at: now - Duration::days(12),
    };

    let appointment = Appointment::from(row.clone());

    assert_eq!(appointment.id(), Some(4));
    assert_eq!(appointment.scheduled_at(), row.scheduled_at);
    assert!(appointment.is_cancelled());
}

#[test]
fn new_appointment_copies_entity_fields() {
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    let appointment =
        Appointment::new(&FixedClock(now), 1, 7, 2, now + Duration::hours(3)).unwrap();

    let insert = NewAppointment::from(&appointment);

    assert_eq!(insert.staff_id, 7);
    assert_eq!(insert.status, enums::AppointmentStatus::Scheduled);
    assert_eq!(insert.created_at, now);
}

#[test]
fn slot_row_round_trips_weekday() {
    let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let end = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    let slot = AvailableSlot::from(AvailableSlotRow {
        id: 3,
        staff_id: 7,
        weekday: enums::Weekday::Thursday,
        start_time: start,
        end_time: end,
    });

    assert_eq!(slot.id(), Some(3));
    assert_eq!(slot.weekday(), agenda_core::types::Weekday::Thursday);

    let insert = NewAvailableSlot::from(&slot);
    assert_eq!(insert.weekday, enums::Weekday::Thursday);
    let changes = AvailableSlotChanges::from(&slot);
    assert_eq!(changes.end_time, end);
}

#[test]
fn service_row_keeps_duration() {
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    let service = Service::from(ServiceRow {
        id: 2,
        staff_id: 7,
        name: "Haircut".to_string(),
        duration_minutes: 45,
        price_cents: 3000,
        created_at: now,
    });

    assert_eq!(service.duration(), Duration::minutes(45));
    assert_eq!(NewService::from(&service).name, "Haircut");
}

#[test]
fn user_row_keeps_hash_and_role() {
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    let user = User::from(UserRow {
        id: 5,
        name: "Ana".to_string(),
        email: "ana@salon.com".to_string(),
        password_hash: "$argon2id$stored".to_string(),
        role: enums::UserRole::Admin,
        created_at: now,
    });

    assert_eq!(user.id(), Some(5));
    assert!(user.is_admin());
    assert_eq!(user.email().as_str(), "ana@salon.com");

    let insert = NewUser::from(&user);
    assert_eq!(insert.password_hash, "$argon2id$stored");
    assert_eq!(insert.role, enums::UserRole::Admin);
}
