//! HTTP tests against the in-memory backend.

use salvo::http::StatusCode;
use salvo::prelude::*;
use salvo::test::{ResponseExt, TestClient};
use serde_json::{Value, json};

use agenda_core::constants::TRACE_ID_HEADER;

use super::{
    API_ROUTE_PREFIX, APPOINTMENTS_ROUTE_PREFIX, STAFF_ROUTE_PREFIX, USERS_ROUTE_PREFIX, routes,
};
use crate::test_support::{BASE_URL, memory_service};

const STAFF: i64 = 7;

fn url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

fn staff_url(rest: &str) -> String {
    url(&format!("{STAFF_ROUTE_PREFIX}/{STAFF}/{rest}"))
}

async fn create_haircut(service: &Service) -> i64 {
    let mut res = TestClient::post(url(&format!("{API_ROUTE_PREFIX}/services")))
        .json(&json!({
            "staff_id": STAFF,
            "name": "Haircut",
            "duration_minutes": 30,
            "price_cents": 2500,
        }))
        .send(service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::CREATED));

    let body: Value = res.take_json().await.unwrap();
    body["id"].as_i64().unwrap()
}

async fn open_monday_morning(service: &Service) -> Value {
    let mut res = TestClient::post(staff_url("slots"))
        .json(&json!({
            "weekday": "monday",
            "start_time": "09:00:00",
            "end_time": "12:00:00",
        }))
        .send(service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::CREATED));

    res.take_json().await.unwrap()
}

async fn book(service: &Service, service_id: i64, scheduled_at: &str) -> Response {
    TestClient::post(url(APPOINTMENTS_ROUTE_PREFIX))
        .json(&json!({
            "client_id": 1,
            "staff_id": STAFF,
            "service_id": service_id,
            "scheduled_at": scheduled_at,
        }))
        .send(service)
        .await
}

#[test_log::test(tokio::test)]
async fn healthcheck_carries_trace_id() {
    let service = memory_service();

    let mut res = TestClient::get(url(&format!("{API_ROUTE_PREFIX}/app/healthcheck")))
        .send(&service)
        .await;

    assert_eq!(res.status_code, Some(StatusCode::OK));
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    assert_eq!(res.take_string().await.unwrap(), "OK");
}

#[test_log::test(tokio::test)]
async fn booking_policy_reports_configured_occupancy() {
    let service = memory_service();

    let mut res = TestClient::get(url(&format!("{API_ROUTE_PREFIX}/app/booking-policy")))
        .send(&service)
        .await;

    let body: Value = res.take_json().await.unwrap();
    assert_eq!(body, json!({ "occupancy": "fixed_half_hour" }));
}

#[test_log::test(tokio::test)]
async fn staff_seven_books_inside_availability_only() {
    let service = memory_service();
    let service_id = create_haircut(&service).await;
    let slot = open_monday_morning(&service).await;
    assert_eq!(slot["weekday"], "monday");
    assert_eq!(slot["staff_id"], STAFF);

    let mut accepted = book(&service, service_id, "2030-01-07T09:30:00Z").await;
    assert_eq!(accepted.status_code, Some(StatusCode::CREATED));
    let appointment: Value = accepted.take_json().await.unwrap();
    assert_eq!(appointment["status"], "scheduled");
    assert_eq!(appointment["id"], 1);

    let mut late = book(&service, service_id, "2030-01-07T11:45:00Z").await;
    assert_eq!(late.status_code, Some(StatusCode::CONFLICT));
    let rejection: Value = late.take_json().await.unwrap();
    assert_eq!(rejection["error"], "slot unavailable");
    assert_eq!(rejection["reason"], "outside_availability");

    let mut listed = TestClient::get(url(&format!(
        "{APPOINTMENTS_ROUTE_PREFIX}?staff_id={STAFF}"
    )))
    .send(&service)
    .await;
    let appointments: Value = listed.take_json().await.unwrap();
    assert_eq!(appointments.as_array().map(Vec::len), Some(1));
}

#[test_log::test(tokio::test)]
async fn double_booking_is_a_conflict() {
    let service = memory_service();
    let service_id = create_haircut(&service).await;
    open_monday_morning(&service).await;

    let first = book(&service, service_id, "2030-01-07T10:00:00Z").await;
    assert_eq!(first.status_code, Some(StatusCode::CREATED));

    let mut second = book(&service, service_id, "2030-01-07T10:00:00Z").await;
    assert_eq!(second.status_code, Some(StatusCode::CONFLICT));
    let body: Value = second.take_json().await.unwrap();
    assert_eq!(body["reason"], "appointment_conflict");
}

#[test_log::test(tokio::test)]
async fn invalid_bookings_are_client_errors() {
    let service = memory_service();
    let service_id = create_haircut(&service).await;
    open_monday_morning(&service).await;

    let mut past = book(&service, service_id, "2029-12-31T10:00:00Z").await;
    assert_eq!(past.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = past.take_json().await.unwrap();
    assert_eq!(body["error"], "Invalid appointment: cannot schedule in the past");

    let missing_service = book(&service, service_id + 1, "2030-01-07T10:00:00Z").await;
    assert_eq!(missing_service.status_code, Some(StatusCode::NOT_FOUND));

    let malformed = TestClient::post(url(APPOINTMENTS_ROUTE_PREFIX))
        .json(&json!({ "client_id": 1 }))
        .send(&service)
        .await;
    assert_eq!(malformed.status_code, Some(StatusCode::BAD_REQUEST));

    let unfiltered = TestClient::get(url(APPOINTMENTS_ROUTE_PREFIX))
        .send(&service)
        .await;
    assert_eq!(unfiltered.status_code, Some(StatusCode::BAD_REQUEST));
}

#[test_log::test(tokio::test)]
async fn status_transitions_over_http() {
    let service = memory_service();
    let service_id = create_haircut(&service).await;
    open_monday_morning(&service).await;
    book(&service, service_id, "2030-01-07T10:00:00Z").await;

    let mut cancelled = TestClient::post(url(&format!("{APPOINTMENTS_ROUTE_PREFIX}/1/cancel")))
        .send(&service)
        .await;
    let body: Value = cancelled.take_json().await.unwrap();
    assert_eq!(body["status"], "cancelled");

    let mut completed = TestClient::post(url(&format!("{APPOINTMENTS_ROUTE_PREFIX}/1/complete")))
        .send(&service)
        .await;
    let body: Value = completed.take_json().await.unwrap();
    assert_eq!(body["status"], "completed");

    let unknown = TestClient::post(url(&format!("{APPOINTMENTS_ROUTE_PREFIX}/99/cancel")))
        .send(&service)
        .await;
    assert_eq!(unknown.status_code, Some(StatusCode::NOT_FOUND));

    let not_a_number = TestClient::post(url(&format!("{APPOINTMENTS_ROUTE_PREFIX}/abc/cancel")))
        .send(&service)
        .await;
    assert_eq!(not_a_number.status_code, Some(StatusCode::BAD_REQUEST));
}

#[test_log::test(tokio::test)]
async fn slot_registration_rules() {
    let service = memory_service();
    open_monday_morning(&service).await;

    let mut overlapping = TestClient::post(staff_url("slots"))
        .json(&json!({
            "weekday": "monday",
            "start_time": "11:00:00",
            "end_time": "13:00:00",
        }))
        .send(&service)
        .await;
    assert_eq!(overlapping.status_code, Some(StatusCode::CONFLICT));
    let body: Value = overlapping.take_json().await.unwrap();
    assert_eq!(body["reason"], "slot_conflict");

    let adjacent = TestClient::post(staff_url("slots"))
        .json(&json!({
            "weekday": "monday",
            "start_time": "12:00:00",
            "end_time": "13:00:00",
        }))
        .send(&service)
        .await;
    assert_eq!(adjacent.status_code, Some(StatusCode::CREATED));

    let mut empty = TestClient::post(staff_url("slots"))
        .json(&json!({
            "weekday": "friday",
            "start_time": "10:00:00",
            "end_time": "10:00:00",
        }))
        .send(&service)
        .await;
    assert_eq!(empty.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = empty.take_json().await.unwrap();
    assert_eq!(body["error"], "Invalid slot: start time must be before end time");

    let bad_weekday = TestClient::post(staff_url("slots"))
        .json(&json!({
            "weekday": "funday",
            "start_time": "10:00:00",
            "end_time": "11:00:00",
        }))
        .send(&service)
        .await;
    assert_eq!(bad_weekday.status_code, Some(StatusCode::BAD_REQUEST));
}

#[test_log::test(tokio::test)]
async fn slots_are_listed_by_date_and_removed() {
    let service = memory_service();
    let slot = open_monday_morning(&service).await;
    let slot_id = slot["id"].as_i64().unwrap();

    let mut monday = TestClient::get(staff_url("slots?date=2030-01-07"))
        .send(&service)
        .await;
    let listed: Value = monday.take_json().await.unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let mut tuesday = TestClient::get(staff_url("slots?date=2030-01-08"))
        .send(&service)
        .await;
    let listed: Value = tuesday.take_json().await.unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(0));

    let bogus = TestClient::get(staff_url("slots?date=next-monday"))
        .send(&service)
        .await;
    assert_eq!(bogus.status_code, Some(StatusCode::BAD_REQUEST));

    let removed = TestClient::delete(url(&format!("{API_ROUTE_PREFIX}/slots/{slot_id}")))
        .send(&service)
        .await;
    assert_eq!(removed.status_code, Some(StatusCode::NO_CONTENT));

    let again = TestClient::delete(url(&format!("{API_ROUTE_PREFIX}/slots/{slot_id}")))
        .send(&service)
        .await;
    assert_eq!(again.status_code, Some(StatusCode::NOT_FOUND));

    let mut all = TestClient::get(staff_url("slots")).send(&service).await;
    let listed: Value = all.take_json().await.unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn services_are_validated_and_listed() {
    let service = memory_service();
    create_haircut(&service).await;

    let negative_price = TestClient::post(url(&format!("{API_ROUTE_PREFIX}/services")))
        .json(&json!({
            "staff_id": STAFF,
            "name": "Shave",
            "duration_minutes": 15,
            "price_cents": -1,
        }))
        .send(&service)
        .await;
    assert_eq!(negative_price.status_code, Some(StatusCode::BAD_REQUEST));

    let mut listed = TestClient::get(staff_url("services")).send(&service).await;
    let services: Value = listed.take_json().await.unwrap();
    assert_eq!(services[0]["name"], "Haircut");
    assert_eq!(services[0]["duration_minutes"], 30);
    assert_eq!(services.as_array().map(Vec::len), Some(1));
}

#[test_log::test(tokio::test)]
async fn service_of_another_staff_member_cannot_be_booked() {
    let service = memory_service();
    open_monday_morning(&service).await;
    let mut created = TestClient::post(url(&format!("{API_ROUTE_PREFIX}/services")))
        .json(&json!({
            "staff_id": 99,
            "name": "Massage",
            "duration_minutes": 60,
            "price_cents": 8000,
        }))
        .send(&service)
        .await;
    let foreign: Value = created.take_json().await.unwrap();

    let mut res = book(&service, foreign["id"].as_i64().unwrap(), "2030-01-07T10:00:00Z").await;

    assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = res.take_json().await.unwrap();
    assert_eq!(
        body["error"],
        "Invalid appointment: service is not offered by this staff member"
    );
}

#[test_log::test(tokio::test)]
async fn users_register_once_per_email() {
    let service = memory_service();

    let mut created = TestClient::post(url(USERS_ROUTE_PREFIX))
        .json(&json!({
            "name": "Ana",
            "email": "ana@salon.com",
            "password": "s3cret-pass",
        }))
        .send(&service)
        .await;
    assert_eq!(created.status_code, Some(StatusCode::CREATED));
    let user: Value = created.take_json().await.unwrap();
    assert_eq!(user["id"], 1);
    assert_eq!(user["role"], "client");
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());

    let mut fetched = TestClient::get(url(&format!("{USERS_ROUTE_PREFIX}/1")))
        .send(&service)
        .await;
    let body: Value = fetched.take_json().await.unwrap();
    assert_eq!(body["email"], "ana@salon.com");

    let duplicate = TestClient::post(url(USERS_ROUTE_PREFIX))
        .json(&json!({
            "name": "Ana Paula",
            "email": "ana@salon.com",
            "password": "another-pass",
            "role": "admin",
        }))
        .send(&service)
        .await;
    assert_eq!(duplicate.status_code, Some(StatusCode::CONFLICT));

    let missing = TestClient::get(url(&format!("{USERS_ROUTE_PREFIX}/2")))
        .send(&service)
        .await;
    assert_eq!(missing.status_code, Some(StatusCode::NOT_FOUND));
}

#[test_log::test(tokio::test)]
async fn invalid_registrations_are_client_errors() {
    let service = memory_service();

    let mut short = TestClient::post(url(USERS_ROUTE_PREFIX))
        .json(&json!({
            "name": "Ana",
            "email": "ana@salon.com",
            "password": "12345",
        }))
        .send(&service)
        .await;
    assert_eq!(short.status_code, Some(StatusCode::BAD_REQUEST));
    let body: Value = short.take_json().await.unwrap();
    assert_eq!(body["error"], "Invalid user: password must be at least 6 characters");

    let bad_email = TestClient::post(url(USERS_ROUTE_PREFIX))
        .json(&json!({
            "name": "Ana",
            "email": "ana.salon.com",
            "password": "s3cret-pass",
        }))
        .send(&service)
        .await;
    assert_eq!(bad_email.status_code, Some(StatusCode::BAD_REQUEST));

    let unknown_role = TestClient::post(url(USERS_ROUTE_PREFIX))
        .json(&json!({
            "name": "Ana",
            "email": "ana@salon.com",
            "password": "s3cret-pass",
            "role": "owner",
        }))
        .send(&service)
        .await;
    assert_eq!(unknown_role.status_code, Some(StatusCode::BAD_REQUEST));
}

#[test_log::test(tokio::test)]
async fn services_can_be_repriced() {
    let service = memory_service();
    let service_id = create_haircut(&service).await;

    let mut repriced = TestClient::patch(url(&format!("{API_ROUTE_PREFIX}/services/{service_id}")))
        .json(&json!({ "price_cents": 3000 }))
        .send(&service)
        .await;
    assert_eq!(repriced.status_code, Some(StatusCode::OK));
    let body: Value = repriced.take_json().await.unwrap();
    assert_eq!(body["price_cents"], 3000);
    assert_eq!(body["duration_minutes"], 30);

    let negative = TestClient::patch(url(&format!("{API_ROUTE_PREFIX}/services/{service_id}")))
        .json(&json!({ "duration_minutes": -5 }))
        .send(&service)
        .await;
    assert_eq!(negative.status_code, Some(StatusCode::BAD_REQUEST));

    let missing = TestClient::patch(url(&format!("{API_ROUTE_PREFIX}/services/99")))
        .json(&json!({ "price_cents": 1 }))
        .send(&service)
        .await;
    assert_eq!(missing.status_code, Some(StatusCode::NOT_FOUND));
}

#[test_log::test(tokio::test)]
async fn missing_booking_service_is_a_server_error() {
    let service = Service::new(Router::new().push(routes()));

    let res = TestClient::get(url(&format!("{APPOINTMENTS_ROUTE_PREFIX}?staff_id={STAFF}")))
        .send(&service)
        .await;

    assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
}
