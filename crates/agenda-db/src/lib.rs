//! `PostgreSQL` persistence for the booking core.

pub mod db;
pub mod error;
pub mod model;
pub mod store;

pub use store::PgStore;
