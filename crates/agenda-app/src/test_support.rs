use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use salvo::Service;

use agenda_core::clock::FixedClock;
use agenda_core::config::{
    BookingConfig, DatabaseConfig, LoggingConfig, ServerConfig, Settings, StoreBackend,
};
use agenda_core::gateway::memory::MemoryStore;
use agenda_core::schedule::OccupancyPolicy;

use crate::bootstrap::{AppServices, router};

pub const BASE_URL: &str = "http://127.0.0.1:5800";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 8, 0, 0).unwrap()
}

pub fn memory_settings() -> Settings {
    Settings {
        database: DatabaseConfig {
            backend: StoreBackend::Memory,
            url: None,
            max_connections: 1,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        booking: BookingConfig {
            occupancy: OccupancyPolicy::FixedHalfHour,
        },
    }
}

/// Full application service over an empty in-memory store with the clock frozen at
/// [`now`].
pub fn memory_service() -> Service {
    let services = AppServices::over_store(
        Arc::new(MemoryStore::new()),
        Arc::new(FixedClock(now())),
        OccupancyPolicy::FixedHalfHour,
    );
    Service::new(router(memory_settings(), services))
}
