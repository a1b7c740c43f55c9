//! Embedded schema migrations.

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{DbError, DbResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// ## Summary
/// Applies every pending migration to the database at `database_url`.
///
/// Diesel's migration harness is synchronous, so it runs on a blocking thread over an
/// async connection wrapper.
///
/// ## Errors
/// Returns an error if the connection cannot be established or a migration fails.
#[tracing::instrument(skip(database_url))]
pub async fn run_migrations(database_url: &str) -> DbResult<()> {
    let database_url = database_url.to_owned();

    let applied = tokio::task::spawn_blocking(move || -> DbResult<usize> {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)?;
        let versions = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::MigrationError(e.to_string()))?;
        Ok(versions.len())
    })
    .await
    .map_err(|e| DbError::MigrationError(e.to_string()))??;

    tracing::info!(applied, "Database migrations up to date");

    Ok(())
}
