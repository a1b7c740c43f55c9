//! User registration.
//!
//! Passwords are hashed with Argon2id before a [`User`] is built; the plaintext never
//! reaches a gateway. Registrations are serialized in-process so the e-mail uniqueness
//! check and the insert cannot interleave; storage uniqueness still backs it up across
//! processes.

mod password;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::sync::Mutex;

use agenda_core::clock::Clock;
use agenda_core::error::GatewayError;
use agenda_core::gateway::UserGateway;
use agenda_core::model::{Password, User};
use agenda_core::types::{Email, Role};

use crate::error::{ServiceError, ServiceResult};

pub use password::hash_password;

/// Request to register a user.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub struct UserService {
    users: Arc<dyn UserGateway>,
    clock: Arc<dyn Clock>,
    registration: Mutex<()>,
}

impl UserService {
    #[must_use]
    pub fn new(users: Arc<dyn UserGateway>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            clock,
            registration: Mutex::new(()),
        }
    }

    /// ## Summary
    /// Validates and stores a new user with a hashed password.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` for a blank name, a malformed e-mail, a short
    /// password or an unknown role, `ServiceError::EmailTaken` if the address is already
    /// registered, and propagates hashing and gateway failures.
    #[tracing::instrument(skip(self, request), fields(role = %request.role))]
    pub async fn register(&self, request: RegisterUser) -> ServiceResult<User> {
        let email = Email::parse(request.email)?;
        let password = Password::new(request.password)?;

        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ServiceError::PasswordHash(e.to_string()))??;

        let mut user = User::new(
            self.clock.as_ref(),
            request.name,
            email,
            password_hash,
            request.role,
        )?;

        let _guard = self.registration.lock().await;

        if self.users.email_exists(user.email()).await? {
            tracing::warn!("Registration refused: email already registered");
            return Err(ServiceError::EmailTaken(user.email().to_string()));
        }

        match self.users.save(&mut user).await {
            Ok(()) => {}
            Err(GatewayError::Duplicate { .. }) => {
                return Err(ServiceError::EmailTaken(user.email().to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(user_id = ?user.id(), "User registered");
        Ok(user)
    }

    /// ## Errors
    /// Returns `ServiceError::NotFound` if no user has this id and propagates gateway
    /// failures.
    #[tracing::instrument(skip(self))]
    pub async fn find(&self, user_id: i64) -> ServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {user_id}")))
    }
}
