//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;
use tomtech_core::WhatsAppNumber;
use tomtech_storefront::catalog::CatalogStore;
use tomtech_storefront::settings;
use tomtech_storefront::storage::{RemoteError, StorageError};
use tower_sessions::cookie::{Key, KeyError};

use crate::config::AdminConfig;

/// Errors building the application state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The remote catalog client could not be built.
    #[error("remote catalog: {0}")]
    Remote(#[from] RemoteError),

    /// The session secret is not usable as a signing key.
    #[error("session key: {0}")]
    SessionKey(#[from] KeyError),
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: CatalogStore,
    session_key: Key,
}

impl AppState {
    /// Build state with the catalog store described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the remote client or session key cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, StateError> {
        let catalog = CatalogStore::from_config(&config.catalog)?;
        Self::with_catalog(config, catalog)
    }

    /// Build state around an existing catalog store.
    ///
    /// # Errors
    ///
    /// Returns `StateError::SessionKey` if the session secret is too short.
    pub fn with_catalog(config: AdminConfig, catalog: CatalogStore) -> Result<Self, StateError> {
        let session_key = Key::try_from(config.session_secret_bytes())?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                session_key,
            }),
        })
    }

    /// Get the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Key that signs session cookies.
    #[must_use]
    pub fn session_key(&self) -> Key {
        self.inner.session_key.clone()
    }

    /// The number orders are sent to right now.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the cache cannot be read.
    pub fn whatsapp_number(&self) -> Result<WhatsAppNumber, StorageError> {
        settings::whatsapp_number(
            self.inner.catalog.cache(),
            &self.inner.config.catalog.default_whatsapp_number,
        )
    }
}
