use thiserror::Error;

use agenda_core::error::{CoreError, GatewayError};

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error(transparent)]
    GatewayError(#[from] GatewayError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl ServiceError {
    /// ## Summary
    /// Returns true if the error means the addressed record does not exist, whether the
    /// lookup happened here or inside a gateway.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::GatewayError(GatewayError::NotFound { .. })
        )
    }

    /// Returns true if the request collides with an existing unique record.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailTaken(_) | Self::GatewayError(GatewayError::Duplicate { .. })
        )
    }

    /// Returns true if the error is an entity invariant violation.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::CoreError(_) | Self::GatewayError(GatewayError::Core(_))
        )
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
