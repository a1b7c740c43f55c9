//! Per-request trace ids.
//!
//! ## Summary
//! Assigns every request a time-ordered UUID, stores it in the depot, runs the rest of the
//! chain inside a `request` span carrying it and echoes it in the `X-Trace-ID` response
//! header so clients can quote it when reporting a problem.

use salvo::Depot;
use salvo::http::HeaderValue;
use tracing::Instrument;

use agenda_core::constants::TRACE_ID_HEADER;

/// Depot key under which the request's trace id is stored.
pub const TRACE_ID_DEPOT_KEY: &str = "trace_id";

pub struct TraceIdMiddleware;

#[salvo::async_trait]
impl salvo::Handler for TraceIdMiddleware {
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let trace_id = uuid::Uuid::now_v7().to_string();

        match HeaderValue::from_str(&trace_id) {
            Ok(value) => {
                res.headers_mut().insert(TRACE_ID_HEADER, value);
            }
            Err(e) => tracing::warn!(error = %e, "Trace id is not a valid header value"),
        }

        let span = tracing::info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.uri().path(),
        );
        depot.insert(TRACE_ID_DEPOT_KEY, trace_id);

        ctrl.call_next(req, depot, res).instrument(span).await;
    }
}

/// Returns the trace id assigned to the current request, if the middleware ran.
#[must_use]
pub fn trace_id_from_depot(depot: &Depot) -> Option<&str> {
    depot
        .get::<String>(TRACE_ID_DEPOT_KEY)
        .ok()
        .map(String::as_str)
}
