//! Wiring of the storage backend, the use-case services and the router.

use std::sync::Arc;

use salvo::Router;

use agenda_core::clock::{Clock, SystemClock};
use agenda_core::config::{Settings, StoreBackend};
use agenda_core::error::CoreError;
use agenda_core::gateway::memory::MemoryStore;
use agenda_core::gateway::{AppointmentGateway, AvailableSlotGateway, ServiceGateway, UserGateway};
use agenda_core::schedule::OccupancyPolicy;
use agenda_db::PgStore;
use agenda_db::db::connection::create_pool;
use agenda_db::db::migration::run_migrations;
use agenda_service::{BookingService, UserService};

use crate::app::api::routes;
use crate::config::ConfigHandler;
use crate::service_handler::ServiceHandler;

/// The use-case services handed to request handlers.
pub struct AppServices {
    pub booking: Arc<BookingService>,
    pub users: Arc<UserService>,
}

impl AppServices {
    /// Builds every service over one store implementing all gateways.
    #[must_use]
    pub fn over_store<S>(store: Arc<S>, clock: Arc<dyn Clock>, occupancy: OccupancyPolicy) -> Self
    where
        S: AppointmentGateway + AvailableSlotGateway + ServiceGateway + UserGateway + 'static,
    {
        let booking =
            BookingService::from_store(Arc::clone(&store), Arc::clone(&clock)).with_occupancy(occupancy);

        Self {
            booking: Arc::new(booking),
            users: Arc::new(UserService::new(store, clock)),
        }
    }
}

/// ## Summary
/// Builds the services over the configured storage backend.
///
/// For `PostgreSQL`, pending migrations are applied before the pool is created.
///
/// ## Errors
/// Returns an error if the postgres backend is selected without a database URL, or if
/// migrating or connecting fails.
#[tracing::instrument(skip(settings), fields(backend = ?settings.database.backend))]
pub async fn build_services(settings: &Settings) -> anyhow::Result<AppServices> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let occupancy = settings.booking.occupancy;

    let services = match settings.database.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store, data will not survive a restart");
            AppServices::over_store(Arc::new(MemoryStore::new()), clock, occupancy)
        }
        StoreBackend::Postgres => {
            let url = settings.database.url.as_deref().ok_or_else(|| {
                CoreError::ConfigError(
                    "database.url is required for the postgres backend".to_string(),
                )
            })?;

            run_migrations(url).await?;
            let pool = create_pool(url, u32::from(settings.database.max_connections)).await?;

            tracing::info!("Database connection pool created.");
            AppServices::over_store(Arc::new(PgStore::new(pool)), clock, occupancy)
        }
    };

    Ok(services)
}

/// Root router with the configuration and services injected into every request.
#[must_use]
pub fn router(settings: Settings, services: AppServices) -> Router {
    Router::new()
        .hoop(ConfigHandler { settings })
        .hoop(ServiceHandler {
            service: services.booking,
        })
        .hoop(ServiceHandler {
            service: services.users,
        })
        .push(routes())
}
