//! Admin account commands.
//!
//! # Usage
//!
//! ```bash
//! # Hash a password for ADMIN_PASSWORD_HASH
//! echo 'long random passphrase' | tomtech admin hash-password
//! ```

use std::io::{BufRead, Write};

use thiserror::Error;
use tomtech_admin::services::auth::{self, AuthError};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Nothing was read from stdin.
    #[error("no password given on stdin")]
    EmptyPassword,

    /// Password rejected or hashing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read one password line from `input` and write its Argon2 PHC hash to `out`.
///
/// # Errors
///
/// Returns `AdminError` if the line is empty, the password is too weak, or
/// I/O fails.
pub fn hash_password(input: impl BufRead, mut out: impl Write) -> Result<(), AdminError> {
    let password = input
        .lines()
        .next()
        .transpose()?
        .map(|line| line.trim_end_matches(['\r', '\n']).to_string())
        .filter(|line| !line.is_empty())
        .ok_or(AdminError::EmptyPassword)?;

    let hash = auth::hash_password(&password)?;
    writeln!(out, "{hash}")?;
    tracing::info!("set ADMIN_PASSWORD_HASH to the printed value");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_from_input() {
        let mut out = Vec::new();
        hash_password("correct horse battery\n".as_bytes(), &mut out).unwrap();

        let hash = String::from_utf8(out).unwrap();
        let hash = hash.trim_end();
        assert!(auth::verify_password("correct horse battery", hash).is_ok());
    }

    #[test]
    fn test_empty_input() {
        let result = hash_password("".as_bytes(), Vec::new());
        assert!(matches!(result, Err(AdminError::EmptyPassword)));
    }

    #[test]
    fn test_weak_password() {
        let result = hash_password("hunter2\n".as_bytes(), Vec::new());
        assert!(matches!(result, Err(AdminError::Auth(AuthError::WeakPassword(_)))));
    }
}
