//! Fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use tomtech_core::WhatsAppNumber;
use tomtech_storefront::catalog::CatalogStore;
use tomtech_storefront::config::{CatalogConfig, DEFAULT_WHATSAPP_NUMBER};
use tomtech_storefront::storage::LocalCache;

use crate::config::AdminConfig;
use crate::services::auth::hash_password;
use crate::state::AppState;

pub const SESSION_SECRET: &str =
    "aB3$kL9#mN2@pQ5&rT8*uW1!xY4^zA7%cE0(fH6)iJ3-lO9+nR2=sV5_gD8~bM1?";

/// Admin config for user `tom` with the given password.
pub fn config(password: &str) -> AdminConfig {
    AdminConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3001,
        base_url: "http://localhost:3001".to_string(),
        username: "tom".to_string(),
        password_hash: SecretString::from(hash_password(password).unwrap()),
        session_secret: SecretString::from(SESSION_SECRET),
        session_timeout_minutes: 30,
        catalog: CatalogConfig::local(
            "./data",
            WhatsAppNumber::parse(DEFAULT_WHATSAPP_NUMBER).unwrap(),
        ),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// State over an in-memory catalog with no remote mirror.
pub fn state(password: &str) -> AppState {
    let catalog = CatalogStore::new(LocalCache::in_memory(), None);
    AppState::with_catalog(config(password), catalog).unwrap()
}
