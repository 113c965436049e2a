//! Catalog loading and saving.
//!
//! [`CatalogStore`] is the only way the catalog is read or written:
//!
//! - **load**: remote mirror, then local cache, then the built-in defaults
//!   (persisted on first use). Stored records are merged with the defaults
//!   before they are decoded.
//! - **save**: local cache first (must succeed), then a best-effort remote
//!   replace with a bounded recreate when the collection is missing.
//!
//! Editor operations are load/mutate/save cycles serialized by a lock so two
//! admins editing at once cannot drop each other's change.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tomtech_core::catalog::{self, ProductRecord, default_catalog, next_product_id, reconcile_all};
use tomtech_core::{DraftError, Product, ProductDraft, ProductId};
use tracing::instrument;

use crate::config::CatalogConfig;
use crate::storage::{LocalCache, RealtimeDatabase, RemoteError, StorageError, keys};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Local cache failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No product with this identifier.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Editor input rejected.
    #[error(transparent)]
    InvalidDraft(#[from] DraftError),
}

/// Where a loaded catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Remote,
    LocalCache,
    Defaults,
}

/// A step of the load fallback that did not produce data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// No remote mirror configured.
    RemoteNotConfigured,
    /// Remote read failed or timed out.
    RemoteUnavailable { reason: String },
    /// Remote answered with no products.
    RemoteEmpty,
    /// Nothing in the local cache.
    CacheMissing,
    /// Local cache document could not be parsed.
    CacheCorrupt { reason: String },
}

/// Result of [`CatalogStore::load`].
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub products: Vec<Product>,
    pub source: CatalogSource,
    pub degradations: Vec<Degradation>,
}

/// Outcome of the remote half of a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoteSync {
    Synced,
    NotConfigured,
    Failed { reason: String },
}

/// Result of [`CatalogStore::save`]. The local write always happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub remote: RemoteSync,
}

impl SaveReport {
    /// Whether the remote mirror now holds the saved list.
    #[must_use]
    pub const fn synced(&self) -> bool {
        matches!(self.remote, RemoteSync::Synced)
    }
}

/// Catalog persistence: local cache plus optional remote mirror.
#[derive(Debug)]
pub struct CatalogStore {
    cache: LocalCache,
    remote: Option<RealtimeDatabase>,
    defaults: Vec<Product>,
    max_recreate_attempts: u32,
    edit_lock: Mutex<()>,
}

impl CatalogStore {
    /// A store over `cache`, mirroring to `remote` when given.
    #[must_use]
    pub fn new(cache: LocalCache, remote: Option<RealtimeDatabase>) -> Self {
        Self {
            cache,
            remote,
            defaults: default_catalog(),
            max_recreate_attempts: 1,
            edit_lock: Mutex::new(()),
        }
    }

    /// Build from configuration: file cache in `data_dir`, remote if set.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the HTTP client cannot be built.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, RemoteError> {
        let cache = LocalCache::open(&config.data_dir);
        let Some(remote_config) = &config.remote else {
            return Ok(Self::new(cache, None));
        };
        let remote = RealtimeDatabase::new(remote_config)?;
        Ok(Self::new(cache, Some(remote))
            .with_max_recreate_attempts(remote_config.max_recreate_attempts))
    }

    /// Bound on collection recreates per save.
    #[must_use]
    pub const fn with_max_recreate_attempts(mut self, attempts: u32) -> Self {
        self.max_recreate_attempts = attempts;
        self
    }

    /// The local cache this store writes to.
    #[must_use]
    pub const fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Whether a remote mirror is configured.
    #[must_use]
    pub const fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Produce the current catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] only for local I/O failures; remote
    /// failures and unreadable cache data are reported as degradations.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<LoadReport, CatalogError> {
        let mut degradations = Vec::new();

        if let Some(products) = self.load_remote(&mut degradations).await {
            self.write_local(&products)?;
            return Ok(finish(products, CatalogSource::Remote, degradations));
        }

        match self.cache.get::<Vec<ProductRecord>>(keys::PRODUCTS) {
            Ok(Some(records)) => match reconcile_all(records, &self.defaults) {
                Ok(products) => {
                    return Ok(finish(products, CatalogSource::LocalCache, degradations));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "cached catalog has invalid products, ignoring it");
                    degradations.push(Degradation::CacheCorrupt {
                        reason: err.to_string(),
                    });
                }
            },
            Ok(None) => {
                tracing::debug!("no cached catalog");
                degradations.push(Degradation::CacheMissing);
            }
            Err(err) if err.is_corrupt() => {
                tracing::warn!(error = %err, "cached catalog is unreadable, ignoring it");
                degradations.push(Degradation::CacheCorrupt {
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!("seeding catalog with defaults");
        let products = self.defaults.clone();
        self.save(&products).await?;
        Ok(finish(products, CatalogSource::Defaults, degradations))
    }

    async fn load_remote(&self, degradations: &mut Vec<Degradation>) -> Option<Vec<Product>> {
        let Some(remote) = &self.remote else {
            tracing::debug!("remote catalog not configured");
            degradations.push(Degradation::RemoteNotConfigured);
            return None;
        };

        match remote.fetch().await {
            Ok(records) if !records.is_empty() => match reconcile_all(records, &self.defaults) {
                Ok(products) => Some(products),
                Err(err) => {
                    tracing::warn!(error = %err, "remote catalog has invalid products, using local data");
                    degradations.push(Degradation::RemoteUnavailable {
                        reason: format!("invalid remote product: {err}"),
                    });
                    None
                }
            },
            Ok(_) => {
                tracing::debug!(collection = remote.collection(), "remote catalog is empty");
                degradations.push(Degradation::RemoteEmpty);
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "remote catalog unavailable, using local data");
                degradations.push(Degradation::RemoteUnavailable {
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    /// Persist a full replacement of the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if the local write fails. Remote
    /// failures are reported in the [`SaveReport`].
    #[instrument(skip_all, fields(count = products.len()))]
    pub async fn save(&self, products: &[Product]) -> Result<SaveReport, CatalogError> {
        self.write_local(products)?;

        let remote = match &self.remote {
            Some(remote) => self.push(remote, products).await,
            None => RemoteSync::NotConfigured,
        };
        Ok(SaveReport { remote })
    }

    fn write_local(&self, products: &[Product]) -> Result<(), StorageError> {
        self.cache.set(keys::PRODUCTS, products)?;
        self.cache.set(
            keys::PRODUCTS_LAST_UPDATE,
            &chrono::Utc::now().timestamp_millis(),
        )
    }

    async fn push(&self, remote: &RealtimeDatabase, products: &[Product]) -> RemoteSync {
        let mut recreates = 0;
        loop {
            match remote.replace(products).await {
                Ok(()) => {
                    tracing::debug!("remote catalog updated");
                    return RemoteSync::Synced;
                }
                Err(RemoteError::NotFound) if recreates < self.max_recreate_attempts => {
                    recreates += 1;
                    tracing::warn!(attempt = recreates, "remote collection missing, recreating");
                    if let Err(err) = remote.recreate(products).await {
                        tracing::warn!(error = %err, "failed to recreate remote collection");
                        return RemoteSync::Failed {
                            reason: err.to_string(),
                        };
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "remote catalog write failed, kept local copy");
                    return RemoteSync::Failed {
                        reason: err.to_string(),
                    };
                }
            }
        }
    }

    /// When the catalog was last written locally, in unix millis.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if the cache cannot be read.
    pub fn last_update(&self) -> Result<Option<i64>, CatalogError> {
        Ok(self.cache.get(keys::PRODUCTS_LAST_UPDATE)?)
    }

    /// Whether a catalog is already stored locally.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if the cache cannot be read.
    pub fn has_local_catalog(&self) -> Result<bool, CatalogError> {
        Ok(self.cache.contains(keys::PRODUCTS)?)
    }

    /// Overwrite the catalog with the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if the local write fails.
    pub async fn seed_defaults(&self) -> Result<SaveReport, CatalogError> {
        let _guard = self.edit_lock.lock().await;
        self.save(&self.defaults).await
    }

    /// Add a product with the next free identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidDraft`] for a blank name, or a storage error.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_product(
        &self,
        draft: ProductDraft,
    ) -> Result<(Product, SaveReport), CatalogError> {
        draft.validate()?;
        let _guard = self.edit_lock.lock().await;

        let mut products = self.load().await?.products;
        let product = draft.into_product(next_product_id(&products));
        products.push(product.clone());

        let report = self.save(&products).await?;
        tracing::info!(id = %product.id, synced = report.synced(), "product created");
        Ok((product, report))
    }

    /// Overlay editor fields onto an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if `id` is unknown.
    #[instrument(skip(self, draft))]
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<(Product, SaveReport), CatalogError> {
        draft.validate()?;
        let _guard = self.edit_lock.lock().await;

        let mut products = self.load().await?.products;
        let product = products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        product.apply_draft(draft);
        let product = product.clone();

        let report = self.save(&products).await?;
        tracing::info!(%id, synced = report.synced(), "product updated");
        Ok((product, report))
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if `id` is unknown.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(Product, SaveReport), CatalogError> {
        let _guard = self.edit_lock.lock().await;

        let mut products = self.load().await?.products;
        let index = products
            .iter()
            .position(|product| product.id == id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        let removed = products.remove(index);

        let report = self.save(&products).await?;
        tracing::info!(%id, synced = report.synced(), "product deleted");
        Ok((removed, report))
    }

    /// Load the catalog and write it back, pushing it to the remote mirror.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] on local failures.
    pub async fn sync(&self) -> Result<SaveReport, CatalogError> {
        let _guard = self.edit_lock.lock().await;
        let products = self.load().await?.products;
        self.save(&products).await
    }

    /// Find one product in a freshly loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if `id` is unknown.
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let products = self.load().await?.products;
        catalog::find(&products, id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(id))
    }
}

fn finish(products: Vec<Product>, source: CatalogSource, degradations: Vec<Degradation>) -> LoadReport {
    tracing::debug!(?source, count = products.len(), "catalog loaded");
    LoadReport {
        products,
        source,
        degradations,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tomtech_core::{Availability, Price, parse_tags};

    use super::*;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: Price::from_units(1200),
            description: "LED headlight bulbs".to_string(),
            category: Some("Lighting".to_string()),
            tags: parse_tags("led, lighting"),
            availability: Availability::InStock,
            featured: false,
            images: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_empty_cache_seeds_defaults() {
        let store = CatalogStore::new(LocalCache::in_memory(), None);

        let report = store.load().await.unwrap();

        assert_eq!(report.source, CatalogSource::Defaults);
        assert_eq!(report.products, default_catalog());
        assert_eq!(
            report.degradations,
            vec![Degradation::RemoteNotConfigured, Degradation::CacheMissing]
        );
        assert!(store.has_local_catalog().unwrap());
        assert!(store.last_update().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cached_catalog_is_reconciled() {
        let cache = LocalCache::in_memory();
        let stored = serde_json::json!([
            {"id": 1, "name": "OBD II(16PIN)", "price": 3000},
            {"id": 9, "name": "WIPER BLADES", "price": 800}
        ]);
        cache.set(keys::PRODUCTS, &stored).unwrap();
        let store = CatalogStore::new(cache, None);

        let report = store.load().await.unwrap();

        assert_eq!(report.source, CatalogSource::LocalCache);
        assert_eq!(report.products.len(), 2);
        assert_eq!(report.products[0].price, Price::from_units(3000));
        assert_eq!(
            report.products[0].importance,
            default_catalog()[0].importance
        );
        assert!(report.products[1].importance.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_cache_falls_back_to_defaults() {
        let cache = LocalCache::in_memory();
        cache.set(keys::PRODUCTS, "definitely not a list").unwrap();
        let store = CatalogStore::new(cache, None);

        let report = store.load().await.unwrap();

        assert_eq!(report.source, CatalogSource::Defaults);
        assert!(matches!(
            report.degradations.last(),
            Some(Degradation::CacheCorrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_without_remote() {
        let store = CatalogStore::new(LocalCache::in_memory(), None);
        let report = store.save(&default_catalog()).await.unwrap();
        assert_eq!(report.remote, RemoteSync::NotConfigured);
        assert!(!report.synced());
    }

    #[tokio::test]
    async fn test_create_product_gets_next_id() {
        let store = CatalogStore::new(LocalCache::in_memory(), None);

        let (product, _) = store.create_product(draft("H4 LED BULBS")).await.unwrap();

        assert_eq!(product.id, ProductId::new(7));
        let products = store.load().await.unwrap().products;
        assert_eq!(products.len(), 7);
        assert_eq!(products[6].name, "H4 LED BULBS");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let store = CatalogStore::new(LocalCache::in_memory(), None);
        let err = store.create_product(draft("   ")).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDraft(DraftError::EmptyName)));
    }

    #[tokio::test]
    async fn test_update_keeps_identifier_and_narrative() {
        let store = CatalogStore::new(LocalCache::in_memory(), None);
        let mut update = draft("CATALYTIC CONVERTER");
        update.price = Price::from_units(7000);
        update.availability = Availability::OutOfStock;

        let (product, _) = store
            .update_product(ProductId::new(5), update)
            .await
            .unwrap();

        assert_eq!(product.id, ProductId::new(5));
        assert_eq!(product.price, Price::from_units(7000));
        assert_eq!(product.importance, default_catalog()[4].importance);
        let reloaded = store.product(ProductId::new(5)).await.unwrap();
        assert_eq!(reloaded.availability, Availability::OutOfStock);
    }

    #[tokio::test]
    async fn test_cleared_fields_survive_reload() {
        let store = CatalogStore::new(LocalCache::in_memory(), None);
        let mut update = draft("OBD II(16PIN)");
        update.description = String::new();
        update.category = None;
        update.tags = Vec::new();

        let (product, _) = store
            .update_product(ProductId::new(1), update)
            .await
            .unwrap();
        assert!(product.tags.is_empty());

        let reloaded = store.product(ProductId::new(1)).await.unwrap();
        assert!(reloaded.tags.is_empty());
        assert!(reloaded.category.is_none());
        assert!(reloaded.description.is_empty());
        assert_eq!(reloaded.importance, default_catalog()[0].importance);
    }

    #[tokio::test]
    async fn test_invalid_cached_product_falls_back_to_defaults() {
        let cache = LocalCache::in_memory();
        let stored = serde_json::json!([{"id": 1, "name": "OBD II(16PIN)", "price": -5}]);
        cache.set(keys::PRODUCTS, &stored).unwrap();
        let store = CatalogStore::new(cache, None);

        let report = store.load().await.unwrap();

        assert_eq!(report.source, CatalogSource::Defaults);
        assert!(matches!(
            report.degradations.last(),
            Some(Degradation::CacheCorrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let store = CatalogStore::new(LocalCache::in_memory(), None);
        let err = store
            .update_product(ProductId::new(99), draft("Nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_product() {
        let store = CatalogStore::new(LocalCache::in_memory(), None);

        let (removed, _) = store.delete_product(ProductId::new(2)).await.unwrap();

        assert_eq!(removed.name, "AUTEL OBDII CABLE");
        let products = store.load().await.unwrap().products;
        assert_eq!(products.len(), 5);
        assert!(catalog::find(&products, ProductId::new(2)).is_none());
        assert!(matches!(
            store.delete_product(ProductId::new(2)).await,
            Err(CatalogError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_emptied_catalog_stays_empty() {
        let store = CatalogStore::new(LocalCache::in_memory(), None);
        store.save(&[]).await.unwrap();

        let report = store.load().await.unwrap();
        assert_eq!(report.source, CatalogSource::LocalCache);
        assert!(report.products.is_empty());
    }

    #[test]
    fn test_report_serialization() {
        let value = serde_json::to_value(Degradation::RemoteUnavailable {
            reason: "timeout".to_string(),
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"kind": "remote_unavailable", "reason": "timeout"})
        );
        assert_eq!(
            serde_json::to_value(CatalogSource::LocalCache).unwrap(),
            "local_cache"
        );
    }
}
