use salvo::http::StatusCode;
use thiserror::Error;

use agenda_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    CoreError(#[from] agenda_core::error::CoreError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// ## Summary
    /// Maps the error onto the HTTP status it is reported with.
    ///
    /// Invariant violations of a request are the client's fault (400), missing records
    /// are 404, duplicates of a unique record are 409 and everything else is a server
    /// failure.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceError(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::ServiceError(err) if err.is_invalid_input() => StatusCode::BAD_REQUEST,
            Self::ServiceError(err) if err.is_conflict() => StatusCode::CONFLICT,
            Self::ServiceError(_) | Self::CoreError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
