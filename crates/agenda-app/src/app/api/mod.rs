mod app_specific;
mod appointments;
mod dto;
mod response;
mod services;
mod slots;
mod staff;
mod users;

#[cfg(test)]
mod tests;

use salvo::Router;

use crate::middleware::trace_id::TraceIdMiddleware;

// Re-export route constants from core
pub use agenda_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APPOINTMENTS_ROUTE_PREFIX, STAFF_ROUTE_PREFIX,
    USERS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router with every booking and user endpoint.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .hoop(TraceIdMiddleware)
        .push(app_specific::routes())
        .push(appointments::routes())
        .push(staff::routes())
        .push(slots::routes())
        .push(services::routes())
        .push(users::routes())
}
