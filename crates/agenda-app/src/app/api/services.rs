use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use agenda_core::constants::SERVICES_ROUTE_COMPONENT;

use super::dto::{CreateServiceRequest, ServiceResponse, UpdateServiceRequest};
use super::response::{bad_request, booking_or_render, id_param_or_render, render_error};

/// ## Summary
/// POST /services - Offer a new service
///
/// ## Errors
/// Returns HTTP 400 for a malformed body, an empty name, a non-positive duration or a
/// negative price
#[handler]
async fn create_service(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };

    let body: CreateServiceRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to parse service request");
            bad_request(res, "invalid request body");
            return;
        }
    };

    match booking.create_service(body.into()).await {
        Ok(service) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(ServiceResponse::from(&service)));
        }
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// PATCH /services/{id} - Change the duration and/or price of a service
///
/// ## Errors
/// Returns HTTP 400 for a malformed body, a non-positive duration or a negative price
/// Returns HTTP 404 if the service does not exist
#[handler]
async fn update_service(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };
    let Some(id) = id_param_or_render(req, res, "id") else {
        return;
    };

    let body: UpdateServiceRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to parse service update");
            bad_request(res, "invalid request body");
            return;
        }
    };

    match booking.update_service(id, body.into()).await {
        Ok(service) => res.render(Json(ServiceResponse::from(&service))),
        Err(e) => render_error(res, &e.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SERVICES_ROUTE_COMPONENT)
        .post(create_service)
        .push(Router::with_path("{id}").patch(update_service))
}
