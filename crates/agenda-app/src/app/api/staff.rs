//! Per-staff availability and service listings.

use chrono::NaiveDate;
use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use agenda_core::constants::{SERVICES_ROUTE_COMPONENT, SLOTS_ROUTE_COMPONENT, STAFF_ROUTE_COMPONENT};
use agenda_service::Outcome;

use super::dto::{RegisterSlotRequest, ServiceResponse, SlotResponse};
use super::response::{
    bad_request, booking_or_render, id_param_or_render, render_error, render_rejection,
};

/// ## Summary
/// POST /staff/{staff_id}/slots - Declare a recurring availability window
///
/// ## Errors
/// Returns HTTP 400 for a malformed body or an empty/inverted window
/// Returns HTTP 409 if the window overlaps an existing one on the same weekday
#[handler]
async fn register_slot(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };
    let Some(staff_id) = id_param_or_render(req, res, "staff_id") else {
        return;
    };

    let body: RegisterSlotRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to parse slot request");
            bad_request(res, "invalid request body");
            return;
        }
    };

    match booking.register_slot(body.for_staff(staff_id)).await {
        Ok(Outcome::Accepted(slot)) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(SlotResponse::from(&slot)));
        }
        Ok(Outcome::Rejected(rejection)) => render_rejection(res, rejection),
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// GET /staff/{staff_id}/slots[?date=YYYY-MM-DD]
///
/// With a date, only the slots recurring on that date's weekday are listed.
#[handler]
async fn list_slots(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };
    let Some(staff_id) = id_param_or_render(req, res, "staff_id") else {
        return;
    };

    let slots = match req.query::<String>("date") {
        Some(raw) => {
            let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") else {
                bad_request(res, "date must be formatted as YYYY-MM-DD");
                return;
            };
            booking.slots_for_date(staff_id, date).await
        }
        None => booking.slots_for_staff(staff_id).await,
    };

    match slots {
        Ok(slots) => res.render(Json(
            slots.iter().map(SlotResponse::from).collect::<Vec<_>>(),
        )),
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// GET /staff/{staff_id}/services
#[handler]
async fn list_services(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };
    let Some(staff_id) = id_param_or_render(req, res, "staff_id") else {
        return;
    };

    match booking.services_for_staff(staff_id).await {
        Ok(services) => res.render(Json(
            services.iter().map(ServiceResponse::from).collect::<Vec<_>>(),
        )),
        Err(e) => render_error(res, &e.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(STAFF_ROUTE_COMPONENT).push(
        Router::with_path("{staff_id}")
            .push(
                Router::with_path(SLOTS_ROUTE_COMPONENT)
                    .post(register_slot)
                    .get(list_slots),
            )
            .push(Router::with_path(SERVICES_ROUTE_COMPONENT).get(list_services)),
    )
}
