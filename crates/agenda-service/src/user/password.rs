use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};

use agenda_core::model::Password;

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Hashes a password using Argon2id with a random salt.
///
/// ## Errors
/// Returns `ServiceError::PasswordHash` if hashing fails.
pub fn hash_password(password: &Password) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map_err(|e| ServiceError::PasswordHash(e.to_string()))?;

    Ok(password_hash.to_string())
}
