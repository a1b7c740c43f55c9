use std::fmt;

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::types::{Email, Role};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A plaintext password that satisfies the length rule. Only ever handed to the hasher.
pub struct Password(String);

impl Password {
    /// ## Errors
    /// Returns `CoreError::InvalidUser` if the password is shorter than
    /// [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(raw: impl Into<String>) -> CoreResult<Self> {
        let raw = raw.into();
        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CoreError::InvalidUser(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// A registered person. Clients book appointments; admins manage the agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Option<i64>,
    name: String,
    email: Email,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl User {
    /// ## Summary
    /// Creates a validated user from an already hashed password.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidUser` if the name is blank.
    pub fn new(
        clock: &dyn Clock,
        name: impl Into<String>,
        email: Email,
        password_hash: String,
        role: Role,
    ) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::InvalidUser("name is required".to_string()));
        }

        Ok(Self {
            id: None,
            name,
            email,
            password_hash,
            role,
            created_at: clock.now(),
        })
    }

    #[must_use]
    pub const fn rehydrate(
        id: i64,
        name: String,
        email: Email,
        password_hash: String,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            email,
            password_hash,
            role,
            created_at,
        }
    }

    /// ## Errors
    /// Returns `CoreError::InvariantViolation` if an identity was already assigned.
    pub fn assign_id(&mut self, id: i64) -> CoreResult<()> {
        if self.id.is_some() {
            return Err(CoreError::InvariantViolation(
                "user identity already assigned",
            ));
        }
        self.id = Some(id);
        Ok(())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[must_use]
    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
