use salvo::prelude::Json;
use salvo::{Depot, Response, Router, handler};
use serde_json::json;

use crate::app::api::response::render_error;
use crate::config::get_config_from_depot;

/// ## Summary
/// Reports the occupancy policy the server books with.
#[handler]
async fn booking_policy(depot: &Depot, res: &mut Response) {
    match get_config_from_depot(depot) {
        Ok(settings) => res.render(Json(json!({ "occupancy": settings.booking.occupancy }))),
        Err(e) => render_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("booking-policy").get(booking_policy)
}
