//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;
use tomtech_core::{Product, ProductId, WhatsAppNumber, catalog};

use crate::catalog::{CatalogError, CatalogStore, LoadReport};
use crate::checkout::MessageFormat;
use crate::config::StorefrontConfig;
use crate::settings;
use crate::storage::{RemoteError, StorageError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog store, configuration, and the last loaded catalog snapshot.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    messages: MessageFormat,
    snapshot: RwLock<Vec<Product>>,
}

impl AppState {
    /// Create the state, opening the catalog store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote catalog client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, RemoteError> {
        let catalog = CatalogStore::from_config(&config.catalog)?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create the state around an existing catalog store.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: CatalogStore) -> Self {
        let messages = MessageFormat::new(config.currency_label.clone(), &config.base_url);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                messages,
                snapshot: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Order message formatting.
    #[must_use]
    pub fn messages(&self) -> &MessageFormat {
        &self.inner.messages
    }

    /// Load the catalog and remember it as the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on local cache failures.
    pub async fn reload_catalog(&self) -> Result<LoadReport, CatalogError> {
        let report = self.inner.catalog.load().await?;
        *self.inner.snapshot.write().await = report.products.clone();
        Ok(report)
    }

    /// The current catalog, loading it if nothing has been loaded yet.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on local cache failures.
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        {
            let snapshot = self.inner.snapshot.read().await;
            if !snapshot.is_empty() {
                return Ok(snapshot.clone());
            }
        }
        Ok(self.reload_catalog().await?.products)
    }

    /// Look a product up in the snapshot, reloading once if it is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if the reloaded catalog does
    /// not contain `id` either.
    pub async fn find_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = catalog::find(&self.inner.snapshot.read().await, id) {
            return Ok(product.clone());
        }
        let report = self.reload_catalog().await?;
        catalog::find(&report.products, id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(id))
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
