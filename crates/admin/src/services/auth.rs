//! Admin authentication service.
//!
//! A single editor account: the username and an Argon2 password hash come
//! from configuration. There is no user database.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::AdminConfig;
use crate::models::CurrentAdmin;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Password rejected before hashing.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Hashing failed.
    #[error("failed to hash password")]
    PasswordHash,
}

/// Check a candidate password before hashing it.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id, returning a PHC string.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` or `AuthError::PasswordHash`.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a PHC hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch or a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Check login credentials against the configured account.
///
/// The password is verified even when the username is wrong so both
/// failures take the same time.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if either part does not match.
pub fn authenticate(
    config: &AdminConfig,
    username: &str,
    password: &str,
) -> Result<CurrentAdmin, AuthError> {
    let password_ok = verify_password(password, config.password_hash.expose_secret()).is_ok();
    if !password_ok || username.trim() != config.username {
        tracing::warn!(username, "admin login rejected");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(CurrentAdmin {
        username: config.username.clone(),
        logged_in_at: Utc::now(),
    })
}
