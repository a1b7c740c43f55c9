use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid appointment: {0}")]
    InvalidAppointment(String),

    #[error("Invalid slot: {0}")]
    InvalidSlot(String),

    #[error("Invalid service: {0}")]
    InvalidService(String),

    #[error("Invalid user: {0}")]
    InvalidUser(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Failures raised by a persistence gateway.
///
/// These are never business outcomes; a conflict or an uncovered window is reported as a
/// plain `false` by the gateway predicates.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{entity} with this {field} already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

impl GatewayError {
    #[must_use]
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
