use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use agenda_core::constants::SLOTS_ROUTE_COMPONENT;

use super::response::{booking_or_render, id_param_or_render, render_error};

/// ## Summary
/// DELETE /slots/{id} - Withdraw an availability window
///
/// Existing appointments inside the window are left untouched.
///
/// ## Errors
/// Returns HTTP 404 if the slot does not exist
#[handler]
async fn remove_slot(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(booking) = booking_or_render(depot, res) else {
        return;
    };
    let Some(id) = id_param_or_render(req, res, "id") else {
        return;
    };

    match booking.remove_slot(id).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_error(res, &e.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SLOTS_ROUTE_COMPONENT).push(Router::with_path("{id}").delete(remove_slot))
}
