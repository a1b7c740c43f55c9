use salvo::async_trait;
use std::sync::Arc;

use agenda_core::error::CoreError;

use crate::error::AppResult;

/// Injects a shared use-case service into every request's depot.
pub struct ServiceHandler<T> {
    pub service: Arc<T>,
}

#[async_trait]
impl<T: Send + Sync + 'static> salvo::Handler for ServiceHandler<T> {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl), fields(service = std::any::type_name::<T>()))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.service));
    }
}

/// ## Summary
/// Retrieves a service injected by [`ServiceHandler`] from the depot.
///
/// ## Errors
/// Returns an error if no service of this type was injected.
pub fn get_service_from_depot<T: Send + Sync + 'static>(
    depot: &salvo::Depot,
) -> AppResult<Arc<T>> {
    depot.obtain::<Arc<T>>().cloned().map_err(|_err| {
        tracing::error!(service = std::any::type_name::<T>(), "Service missing from depot");
        CoreError::InvariantViolation("Service not found in depot").into()
    })
}
