//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (used in order links)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CURRENCY_LABEL` - Currency shown in order messages (default: KES)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! ## Catalog (shared with the admin panel and CLI)
//! - `TOMTECH_DATA_DIR` - Local cache directory (default: ./data)
//! - `WHATSAPP_NUMBER` - Default order number (default: 254702466009)
//! - `REMOTE_DATABASE_URL` - Realtime database root; unset means local-only
//! - `REMOTE_AUTH_TOKEN` - Database auth token
//! - `REMOTE_COLLECTION` - Collection holding the catalog (default: products)
//! - `REMOTE_TIMEOUT_SECS` - HTTP timeout (default: 10)
//! - `REMOTE_MAX_RECREATE_ATTEMPTS` - Recreate attempts after a not-found write (default: 1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use tomtech_core::WhatsAppNumber;
use url::Url;

/// Default WhatsApp number orders are sent to.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "254702466009";

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Currency label for order messages
    pub currency_label: String,
    /// Catalog persistence settings
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (production, staging, ...)
    pub sentry_environment: Option<String>,
}

/// Where the catalog lives: the local cache directory and, optionally, the
/// remote realtime database mirror.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory holding the local cache files
    pub data_dir: PathBuf,
    /// Number used when no override is stored in the local cache
    pub default_whatsapp_number: WhatsAppNumber,
    /// Remote mirror; `None` runs local-only
    pub remote: Option<RemoteConfig>,
}

/// Remote realtime database settings.
///
/// Implements `Debug` manually to redact the auth token.
#[derive(Clone)]
pub struct RemoteConfig {
    /// Database root URL (always ends with `/`)
    pub database_url: Url,
    /// Auth token appended as `?auth=`
    pub auth_token: Option<SecretString>,
    /// Collection holding the product list
    pub collection: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// How many times a not-found replace may recreate the collection
    pub max_recreate_attempts: u32,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("database_url", &self.database_url.as_str())
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("collection", &self.collection)
            .field("timeout", &self.timeout)
            .field("max_recreate_attempts", &self.max_recreate_attempts)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            host,
            port,
            base_url,
            currency_label: get_env_or_default("CURRENCY_LABEL", "KES"),
            catalog: CatalogConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    /// Load the catalog settings shared by every binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default_whatsapp_number =
            WhatsAppNumber::parse(&get_env_or_default("WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER))
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("WHATSAPP_NUMBER".to_string(), e.to_string())
                })?;

        Ok(Self {
            data_dir: PathBuf::from(get_env_or_default("TOMTECH_DATA_DIR", "./data")),
            default_whatsapp_number,
            remote: RemoteConfig::from_env()?,
        })
    }

    /// Local-only configuration rooted at `data_dir`.
    #[must_use]
    pub fn local(data_dir: impl Into<PathBuf>, default_whatsapp_number: WhatsAppNumber) -> Self {
        Self {
            data_dir: data_dir.into(),
            default_whatsapp_number,
            remote: None,
        }
    }
}

impl RemoteConfig {
    /// Returns `None` when `REMOTE_DATABASE_URL` is unset or blank.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(raw_url) = get_optional_env("REMOTE_DATABASE_URL").filter(|v| !v.trim().is_empty())
        else {
            return Ok(None);
        };

        let database_url = parse_database_url(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("REMOTE_DATABASE_URL".to_string(), e.to_string())
        })?;
        let timeout_secs: u64 = parse_env("REMOTE_TIMEOUT_SECS", "10")?;

        Ok(Some(Self {
            database_url,
            auth_token: get_optional_env("REMOTE_AUTH_TOKEN")
                .filter(|v| !v.is_empty())
                .map(SecretString::from),
            collection: get_env_or_default("REMOTE_COLLECTION", "products"),
            timeout: Duration::from_secs(timeout_secs),
            max_recreate_attempts: parse_env("REMOTE_MAX_RECREATE_ATTEMPTS", "1")?,
        }))
    }

    /// Remote configuration with default collection, timeout and recreate bound.
    ///
    /// # Errors
    ///
    /// Returns an error if `database_url` is not an absolute URL.
    pub fn new(database_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            database_url: parse_database_url(database_url)?,
            auth_token: None,
            collection: "products".to_string(),
            timeout: Duration::from_secs(10),
            max_recreate_attempts: 1,
        })
    }
}

/// Parse the database root, making sure it ends with `/` so paths join under it.
fn parse_database_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if the variable is unset.
pub fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
#[must_use]
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
#[must_use]
pub fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) with `FromStr`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the value does not parse.
pub fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` naming the failed check.
pub fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_database_url_gets_trailing_slash() {
        let url = parse_database_url("https://tomtech-default-rtdb.firebaseio.com").unwrap();
        assert_eq!(url.as_str(), "https://tomtech-default-rtdb.firebaseio.com/");

        let nested = parse_database_url("http://127.0.0.1:9000/shop").unwrap();
        assert_eq!(nested.join("products.json").unwrap().path(), "/shop/products.json");
    }

    #[test]
    fn test_database_url_rejects_relative() {
        assert!(parse_database_url("not a url").is_err());
    }

    #[test]
    fn test_local_catalog_config() {
        let number = WhatsAppNumber::parse(DEFAULT_WHATSAPP_NUMBER).unwrap();
        let config = CatalogConfig::local("/tmp/tomtech", number);
        assert!(config.remote.is_none());
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tomtech"));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            currency_label: "KES".to_string(),
            catalog: CatalogConfig::local(
                "./data",
                WhatsAppNumber::parse(DEFAULT_WHATSAPP_NUMBER).unwrap(),
            ),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_remote_config_debug_redacts_token() {
        let mut config = RemoteConfig::new("https://db.example.test").unwrap();
        config.auth_token = Some(SecretString::from("super_secret_db_token"));

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("db.example.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_db_token"));
    }
}
