//! Session middleware configuration for admin.
//!
//! In-memory sessions with a signed cookie, `SameSite=Strict`, and an idle
//! timeout that restarts on every request.

use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AdminConfig;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "tomtech_admin_session";

/// Create the session layer.
///
/// `key` signs the session cookie; it is derived from the configured secret
/// when the application state is built.
#[must_use]
pub fn create_session_layer(
    config: &AdminConfig,
    key: Key,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::minutes(config.session_timeout_minutes),
        ))
        .with_always_save(true)
        .with_secure(is_secure)
        // SameSite=Strict for admin (stricter than storefront's Lax)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
