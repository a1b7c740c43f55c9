use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use agenda_core::clock::FixedClock;
use agenda_core::error::{GatewayError, GatewayResult};
use agenda_core::gateway::AppointmentGateway;
use agenda_core::gateway::memory::MemoryStore;
use agenda_core::model::Appointment;
use agenda_core::schedule::OccupancyPolicy;
use agenda_core::types::{AppointmentStatus, Weekday};

use super::*;

const STAFF: i64 = 7;
const CLIENT: i64 = 1;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 8, 0, 0).unwrap()
}

/// 2030-01-07 is a Monday.
fn monday_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 7, hour, minute, 0).unwrap()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn booking_service() -> BookingService {
    BookingService::from_store(Arc::new(MemoryStore::new()), Arc::new(FixedClock(now())))
}

async fn open_monday_morning(booking: &BookingService) {
    let outcome = booking
        .register_slot(RegisterSlot {
            staff_id: STAFF,
            weekday: Weekday::Monday,
            start_time: hm(9, 0),
            end_time: hm(12, 0),
        })
        .await
        .unwrap();
    assert!(outcome.is_accepted());
}

async fn half_hour_service(booking: &BookingService) -> i64 {
    booking
        .create_service(CreateService {
            staff_id: STAFF,
            name: "Haircut".to_string(),
            duration_minutes: 30,
            price_cents: 2500,
        })
        .await
        .unwrap()
        .id()
        .unwrap()
}

fn request(service_id: i64, scheduled_at: DateTime<Utc>) -> BookAppointment {
    BookAppointment {
        client_id: CLIENT,
        staff_id: STAFF,
        service_id,
        scheduled_at,
    }
}

#[test_log::test(tokio::test)]
async fn staff_seven_end_to_end() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let accepted = booking
        .book(request(service_id, monday_at(9, 30)))
        .await
        .unwrap()
        .accepted()
        .unwrap();
    assert_eq!(accepted.id(), Some(1));
    assert!(accepted.is_scheduled());

    let late = booking
        .book(request(service_id, monday_at(11, 45)))
        .await
        .unwrap();
    assert_eq!(late.rejection(), Some(Rejection::OutsideAvailability));

    assert_eq!(booking.appointments_for_staff(STAFF).await.unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn booking_on_the_wrong_weekday_is_outside_availability() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let sunday = Utc.with_ymd_and_hms(2030, 1, 6, 9, 30, 0).unwrap();
    let outcome = booking.book(request(service_id, sunday)).await.unwrap();

    assert_eq!(outcome.rejection(), Some(Rejection::OutsideAvailability));
}

#[test_log::test(tokio::test)]
async fn window_ending_at_slot_end_is_accepted() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let outcome = booking
        .book(request(service_id, monday_at(11, 30)))
        .await
        .unwrap();

    assert!(outcome.is_accepted());
}

#[test_log::test(tokio::test)]
async fn overlapping_booking_is_rejected() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    assert!(
        booking
            .book(request(service_id, monday_at(10, 0)))
            .await
            .unwrap()
            .is_accepted()
    );

    let outcome = booking
        .book(request(service_id, monday_at(9, 45)))
        .await
        .unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::AppointmentConflict));
}

#[test_log::test(tokio::test)]
async fn occupancy_policy_decides_late_start_overlap() {
    // A 10:15 start overlaps a 10:00 half hour, but its end (10:45) lies outside it.
    for (policy, expected) in [
        (OccupancyPolicy::FixedHalfHour, None),
        (
            OccupancyPolicy::ServiceDuration,
            Some(Rejection::AppointmentConflict),
        ),
    ] {
        let booking = booking_service().with_occupancy(policy);
        open_monday_morning(&booking).await;
        let service_id = half_hour_service(&booking).await;

        booking
            .book(request(service_id, monday_at(10, 0)))
            .await
            .unwrap();
        let outcome = booking
            .book(request(service_id, monday_at(10, 15)))
            .await
            .unwrap();

        assert_eq!(outcome.rejection(), expected, "{policy:?}");
    }
}

#[test_log::test(tokio::test)]
async fn cancelled_appointment_frees_the_window() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let first = booking
        .book(request(service_id, monday_at(10, 0)))
        .await
        .unwrap()
        .accepted()
        .unwrap();
    let cancelled = booking.cancel(first.id().unwrap()).await.unwrap();
    assert!(cancelled.is_cancelled());

    let again = booking
        .book(request(service_id, monday_at(10, 0)))
        .await
        .unwrap();
    assert!(again.is_accepted());
}

#[test_log::test(tokio::test)]
async fn complete_overwrites_cancelled() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let id = booking
        .book(request(service_id, monday_at(10, 0)))
        .await
        .unwrap()
        .accepted()
        .unwrap()
        .id()
        .unwrap();

    booking.cancel(id).await.unwrap();
    booking.cancel(id).await.unwrap();
    let completed = booking.complete(id).await.unwrap();

    assert_eq!(completed.status(), AppointmentStatus::Completed);
    let stored = booking.appointments_for_staff(STAFF).await.unwrap();
    assert!(stored[0].is_completed());
}

#[test_log::test(tokio::test)]
async fn invalid_requests_are_errors_not_rejections() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let past = booking
        .book(request(service_id, now() - Duration::minutes(1)))
        .await
        .unwrap_err();
    assert!(past.is_invalid_input());
    assert_eq!(
        past.to_string(),
        "Invalid appointment: cannot schedule in the past"
    );

    let missing = booking
        .book(request(service_id + 10, monday_at(10, 0)))
        .await
        .unwrap_err();
    assert!(missing.is_not_found());

    let unknown = booking.cancel(99).await.unwrap_err();
    assert!(matches!(unknown, ServiceError::NotFound(_)));
}

#[test_log::test(tokio::test)]
async fn service_of_another_staff_member_is_refused() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let foreign = booking
        .create_service(CreateService {
            staff_id: 99,
            name: "Massage".to_string(),
            duration_minutes: 60,
            price_cents: 8000,
        })
        .await
        .unwrap();

    let err = booking
        .book(request(foreign.id().unwrap(), monday_at(10, 0)))
        .await
        .unwrap_err();

    assert!(err.is_invalid_input());
    assert_eq!(
        err.to_string(),
        "Invalid appointment: service is not offered by this staff member"
    );
    assert!(booking.appointments_for_staff(STAFF).await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn booking_at_the_end_of_time_is_invalid_not_a_panic() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let err = booking
        .book(request(service_id, DateTime::<Utc>::MAX_UTC))
        .await
        .unwrap_err();

    assert!(err.is_invalid_input());
}

#[test_log::test(tokio::test)]
async fn slot_registration_rejects_overlap_but_allows_adjacency() {
    let booking = booking_service();
    open_monday_morning(&booking).await;

    let overlapping = booking
        .register_slot(RegisterSlot {
            staff_id: STAFF,
            weekday: Weekday::Monday,
            start_time: hm(11, 0),
            end_time: hm(13, 0),
        })
        .await
        .unwrap();
    assert_eq!(overlapping.rejection(), Some(Rejection::SlotConflict));

    let adjacent = booking
        .register_slot(RegisterSlot {
            staff_id: STAFF,
            weekday: Weekday::Monday,
            start_time: hm(12, 0),
            end_time: hm(14, 0),
        })
        .await
        .unwrap();
    assert!(adjacent.is_accepted());

    let other_day = booking
        .register_slot(RegisterSlot {
            staff_id: STAFF,
            weekday: Weekday::Tuesday,
            start_time: hm(9, 0),
            end_time: hm(12, 0),
        })
        .await
        .unwrap();
    assert!(other_day.is_accepted());

    assert_eq!(booking.slots_for_staff(STAFF).await.unwrap().len(), 3);
}

#[test_log::test(tokio::test)]
async fn invalid_slot_is_an_error() {
    let booking = booking_service();

    let err = booking
        .register_slot(RegisterSlot {
            staff_id: STAFF,
            weekday: Weekday::Monday,
            start_time: hm(12, 0),
            end_time: hm(12, 0),
        })
        .await
        .unwrap_err();

    assert!(err.is_invalid_input());
}

#[test_log::test(tokio::test)]
async fn slots_for_date_follow_the_weekday() {
    let booking = booking_service();
    open_monday_morning(&booking).await;

    let monday = NaiveDate::from_ymd_opt(2030, 1, 7).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2030, 1, 8).unwrap();

    assert_eq!(booking.slots_for_date(STAFF, monday).await.unwrap().len(), 1);
    assert!(booking.slots_for_date(STAFF, tuesday).await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn removed_slot_no_longer_accepts_bookings() {
    let booking = booking_service();
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let slot_id = booking.slots_for_staff(STAFF).await.unwrap()[0].id().unwrap();
    booking.remove_slot(slot_id).await.unwrap();

    let outcome = booking
        .book(request(service_id, monday_at(10, 0)))
        .await
        .unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::OutsideAvailability));

    let again = booking.remove_slot(slot_id).await.unwrap_err();
    assert!(again.is_not_found());
}

#[test_log::test(tokio::test)]
async fn services_are_listed_per_staff() {
    let booking = booking_service();
    half_hour_service(&booking).await;

    let invalid = booking
        .create_service(CreateService {
            staff_id: STAFF,
            name: "  ".to_string(),
            duration_minutes: 30,
            price_cents: 0,
        })
        .await
        .unwrap_err();
    assert!(invalid.is_invalid_input());

    assert_eq!(booking.services_for_staff(STAFF).await.unwrap().len(), 1);
    assert!(booking.services_for_staff(STAFF + 1).await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn service_updates_keep_invariants() {
    let booking = booking_service();
    let service_id = half_hour_service(&booking).await;

    let updated = booking
        .update_service(
            service_id,
            UpdateService {
                price_cents: Some(3000),
                ..UpdateService::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price_cents(), 3000);
    assert_eq!(updated.duration_minutes(), 30);

    let refused = booking
        .update_service(
            service_id,
            UpdateService {
                duration_minutes: Some(0),
                price_cents: Some(1000),
            },
        )
        .await
        .unwrap_err();
    assert!(refused.is_invalid_input());

    let stored = booking.services_for_staff(STAFF).await.unwrap();
    assert_eq!(stored[0].price_cents(), 3000);

    let missing = booking
        .update_service(service_id + 1, UpdateService::default())
        .await
        .unwrap_err();
    assert!(missing.is_not_found());
}

#[test_log::test(tokio::test)]
async fn longer_service_extends_occupancy_of_existing_bookings() {
    let booking = booking_service().with_occupancy(OccupancyPolicy::ServiceDuration);
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    booking
        .book(request(service_id, monday_at(10, 0)))
        .await
        .unwrap();
    booking
        .update_service(
            service_id,
            UpdateService {
                duration_minutes: Some(60),
                ..UpdateService::default()
            },
        )
        .await
        .unwrap();

    let outcome = booking
        .book(request(service_id, monday_at(10, 45)))
        .await
        .unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::AppointmentConflict));
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn concurrent_bookings_for_one_window_accept_once() {
    let booking = Arc::new(booking_service());
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let booking = Arc::clone(&booking);
            tokio::spawn(async move { booking.book(request(service_id, monday_at(10, 0))).await })
        })
        .collect();

    let mut accepted = 0;
    for attempt in attempts {
        if attempt.await.unwrap().unwrap().is_accepted() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(booking.appointments_for_staff(STAFF).await.unwrap().len(), 1);
}

/// Appointment gateway whose reads always fail.
struct UnreachableAppointments;

#[async_trait]
impl AppointmentGateway for UnreachableAppointments {
    async fn find_by_id(&self, _id: i64) -> GatewayResult<Option<Appointment>> {
        Err(GatewayError::backend(anyhow::anyhow!("connection refused")))
    }

    async fn find_by_staff(&self, _staff_id: i64) -> GatewayResult<Vec<Appointment>> {
        Err(GatewayError::backend(anyhow::anyhow!("connection refused")))
    }

    async fn save(&self, _appointment: &mut Appointment) -> GatewayResult<()> {
        Ok(())
    }

    async fn update(&self, _appointment: &Appointment) -> GatewayResult<()> {
        Ok(())
    }

    async fn delete(&self, _id: i64) -> GatewayResult<()> {
        Ok(())
    }
}

#[test_log::test(tokio::test)]
async fn gateway_failure_is_propagated_not_rejected() {
    let store = Arc::new(MemoryStore::new());
    let booking = BookingService::new(
        Arc::new(UnreachableAppointments),
        store.clone(),
        store,
        Arc::new(FixedClock(now())),
    );
    open_monday_morning(&booking).await;
    let service_id = half_hour_service(&booking).await;

    let err = booking
        .book(request(service_id, monday_at(10, 0)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::GatewayError(GatewayError::Backend(_))
    ));
    assert!(!err.is_not_found());
}
