//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the admin panel
//! - `ADMIN_USERNAME` - Login name of the catalog editor
//! - `ADMIN_PASSWORD_HASH` - Argon2 PHC string (`tomtech admin hash-password`)
//! - `ADMIN_SESSION_SECRET` - Cookie signing secret (min 64 chars, high entropy)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_SESSION_TIMEOUT_MINUTES` - Idle timeout (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! The catalog variables (`TOMTECH_DATA_DIR`, `REMOTE_DATABASE_URL`, ...)
//! are shared with the storefront.

use std::net::{IpAddr, SocketAddr};

use argon2::PasswordHash;
use secrecy::{ExposeSecret, SecretString};
use tomtech_storefront::config::{
    CatalogConfig, get_optional_env, get_required_env, parse_env, validate_secret_strength,
};

pub use tomtech_storefront::config::ConfigError;

/// Signed cookies need 64 bytes of key material.
pub const MIN_SESSION_SECRET_LENGTH: usize = 64;

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Editor login name
    pub username: String,
    /// Argon2 hash of the editor password
    pub password_hash: SecretString,
    /// Session cookie signing secret
    pub session_secret: SecretString,
    /// Minutes of inactivity before the session ends
    pub session_timeout_minutes: i64,
    /// Catalog storage shared with the storefront
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, the password
    /// hash is not a PHC string, or the session secret is weak.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = parse_env("ADMIN_HOST", "127.0.0.1")?;
        let port = parse_env("ADMIN_PORT", "3001")?;
        let base_url = get_required_env("ADMIN_BASE_URL")?;
        let username = get_required_env("ADMIN_USERNAME")?;

        let password_hash = get_required_env("ADMIN_PASSWORD_HASH")?;
        validate_password_hash(&password_hash)?;

        let session_secret = get_required_env("ADMIN_SESSION_SECRET")?;
        validate_session_secret(&session_secret)?;

        let session_timeout_minutes = parse_env("ADMIN_SESSION_TIMEOUT_MINUTES", "30")?;
        if session_timeout_minutes <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_SESSION_TIMEOUT_MINUTES".to_string(),
                "must be positive".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            base_url,
            username,
            password_hash: SecretString::from(password_hash),
            session_secret: SecretString::from(session_secret),
            session_timeout_minutes,
            catalog: CatalogConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Get the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Session secret as key material.
    #[must_use]
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.expose_secret().as_bytes()
    }
}

fn validate_password_hash(hash: &str) -> Result<(), ConfigError> {
    PasswordHash::new(hash).map(|_| ()).map_err(|e| {
        ConfigError::InvalidEnvVar(
            "ADMIN_PASSWORD_HASH".to_string(),
            format!("not a PHC password hash: {e}"),
        )
    })
}

fn validate_session_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            "ADMIN_SESSION_SECRET".to_string(),
            format!("must be at least {MIN_SESSION_SECRET_LENGTH} characters"),
        ));
    }
    validate_secret_strength(secret, "ADMIN_SESSION_SECRET")
}
