use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use agenda_core::constants::APPOINTMENTS_ROUTE_COMPONENT;
use agenda_service::Outcome;

use super::dto::{AppointmentResponse, BookAppointmentRequest};
use super::response::{
    bad_request, booking_or_render, id_param_or_render, render_error, render_rejection,
};

/// ## Summary
/// POST /appointments - Book an appointment
///
/// ## Errors
/// Returns HTTP 400 for a malformed body or an invalid appointment
/// Returns HTTP 404 if the service does not exist
/// Returns HTTP 409 if the staff member is unavailable or already booked
/// Returns HTTP 500 if the store fails
#[handler]
async fn book_appointment(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };

    let body: BookAppointmentRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to parse booking request");
            bad_request(res, "invalid request body");
            return;
        }
    };

    match booking.book(body.into()).await {
        Ok(Outcome::Accepted(appointment)) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(AppointmentResponse::from(&appointment)));
        }
        Ok(Outcome::Rejected(rejection)) => render_rejection(res, rejection),
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// GET /appointments?staff_id= - List a staff member's appointments, earliest first
#[handler]
async fn list_appointments(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };

    let Some(staff_id) = req.query::<i64>("staff_id") else {
        bad_request(res, "staff_id query parameter is required");
        return;
    };

    match booking.appointments_for_staff(staff_id).await {
        Ok(appointments) => res.render(Json(
            appointments
                .iter()
                .map(AppointmentResponse::from)
                .collect::<Vec<_>>(),
        )),
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// POST /appointments/{id}/cancel
#[handler]
async fn cancel_appointment(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };
    let Some(id) = id_param_or_render(req, res, "id") else {
        return;
    };

    match booking.cancel(id).await {
        Ok(appointment) => res.render(Json(AppointmentResponse::from(&appointment))),
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// POST /appointments/{id}/complete
#[handler]
async fn complete_appointment(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };
    let Some(id) = id_param_or_render(req, res, "id") else {
        return;
    };

    match booking.complete(id).await {
        Ok(appointment) => res.render(Json(AppointmentResponse::from(&appointment))),
        Err(e) => render_error(res, &e.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(APPOINTMENTS_ROUTE_COMPONENT)
        .post(book_appointment)
        .get(list_appointments)
        .push(Router::with_path("{id}/cancel").post(cancel_appointment))
        .push(Router::with_path("{id}/complete").post(complete_appointment))
}
