use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error("Connection error: {0}")]
    ConnectionError(#[from] diesel::ConnectionError),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    CoreError(#[from] agenda_core::error::CoreError),
}

pub type DbResult<T> = std::result::Result<T, DbError>;

impl From<DbError> for agenda_core::error::GatewayError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::CoreError(core) => Self::Core(core),
            other => Self::backend(other),
        }
    }
}
