use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response};
use std::sync::Arc;

use agenda_service::{BookingService, Rejection, UserService};

use super::dto::ErrorResponse;
use crate::service_handler::get_service_from_depot;
use crate::error::AppError;

/// ## Summary
/// Renders `err` with the status it maps to.
///
/// Server-side failures are logged and reported without detail; client errors carry the
/// error message.
pub fn render_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();

    let message = if status.is_server_error() {
        tracing::error!(error = ?err, "Request failed");
        "Internal server error".to_string()
    } else {
        tracing::debug!(error = %err, "Request refused");
        err.to_string()
    };

    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: message,
        reason: None,
    }));
}

/// Renders a business rejection as `409 Conflict`.
pub fn render_rejection(res: &mut Response, rejection: Rejection) {
    res.status_code(StatusCode::CONFLICT);
    res.render(Json(ErrorResponse {
        error: "slot unavailable".to_string(),
        reason: Some(rejection.as_str()),
    }));
}

pub fn bad_request(res: &mut Response, message: impl Into<String>) {
    render_error(res, &AppError::BadRequest(message.into()));
}

fn service_or_render<T: Send + Sync + 'static>(
    depot: &Depot,
    res: &mut Response,
) -> Option<Arc<T>> {
    match get_service_from_depot::<T>(depot) {
        Ok(service) => Some(service),
        Err(e) => {
            render_error(res, &e);
            None
        }
    }
}

/// Fetches the booking service, rendering a 500 if the depot does not hold one.
pub fn booking_or_render(depot: &Depot, res: &mut Response) -> Option<Arc<BookingService>> {
    service_or_render(depot, res)
}

/// Fetches the user service, rendering a 500 if the depot does not hold one.
pub fn users_or_render(depot: &Depot, res: &mut Response) -> Option<Arc<UserService>> {
    service_or_render(depot, res)
}

/// Reads an integer path parameter, rendering a 400 if it is missing or malformed.
pub fn id_param_or_render(req: &Request, res: &mut Response, name: &str) -> Option<i64> {
    let id = req.param::<i64>(name);
    if id.is_none() {
        bad_request(res, format!("{name} must be an integer"));
    }
    id
}
