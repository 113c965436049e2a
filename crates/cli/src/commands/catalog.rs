//! Catalog maintenance commands.
//!
//! # Usage
//!
//! ```bash
//! tomtech catalog list
//! tomtech catalog seed --force
//! tomtech catalog sync
//! tomtech catalog export catalog.json
//! tomtech catalog add --name "LED HEADLIGHT KIT" --price 3500 --tags led,lighting
//! tomtech catalog remove 7
//! ```
//!
//! # Environment Variables
//!
//! Same catalog variables as the storefront: `TOMTECH_DATA_DIR`,
//! `REMOTE_DATABASE_URL`, `REMOTE_AUTH_TOKEN`, ...

use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tomtech_core::{Product, ProductDraft, ProductId};
use tomtech_storefront::catalog::{CatalogError, CatalogStore, RemoteSync, SaveReport};
use tomtech_storefront::config::{CatalogConfig, ConfigError};
use tomtech_storefront::storage::RemoteError;

/// Errors from catalog commands.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// Environment is misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Remote client could not be built.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Load or save failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// `seed` without `--force` over an existing catalog.
    #[error("a catalog is already stored locally; pass --force to overwrite it")]
    AlreadySeeded,

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open the catalog store described by the environment.
///
/// # Errors
///
/// Returns `CatalogCommandError` if configuration is invalid.
pub fn open_store() -> Result<CatalogStore, CatalogCommandError> {
    let config = CatalogConfig::from_env()?;
    tracing::debug!(data_dir = %config.data_dir.display(), "opening catalog");
    Ok(CatalogStore::from_config(&config)?)
}

/// Print the catalog with where it came from.
///
/// # Errors
///
/// Returns `CatalogCommandError` on load or write failure.
pub async fn list(store: &CatalogStore, mut out: impl Write) -> Result<(), CatalogCommandError> {
    let report = store.load().await?;

    writeln!(out, "source: {:?}", report.source)?;
    for degradation in &report.degradations {
        writeln!(out, "note: {degradation:?}")?;
    }
    for product in &report.products {
        writeln!(out, "{}", format_row(product))?;
    }
    writeln!(out, "{} products", report.products.len())?;
    Ok(())
}

fn format_row(product: &Product) -> String {
    format!(
        "{:>4}  {:<32}  {:>10}  {:<12}{}",
        product.id.as_u32(),
        product.name,
        product.price.display_grouped(),
        product.availability.label(),
        if product.featured { "  *" } else { "" }
    )
}

fn describe(report: &SaveReport) -> String {
    match &report.remote {
        RemoteSync::Synced => "remote: synced".to_string(),
        RemoteSync::NotConfigured => "remote: not configured, saved locally".to_string(),
        RemoteSync::Failed { reason } => format!("remote: failed ({reason}), saved locally"),
    }
}

/// Write the default catalog.
///
/// # Errors
///
/// Returns `CatalogCommandError::AlreadySeeded` if a catalog exists and
/// `force` is false.
pub async fn seed(
    store: &CatalogStore,
    force: bool,
    mut out: impl Write,
) -> Result<(), CatalogCommandError> {
    if !force && store.has_local_catalog()? {
        return Err(CatalogCommandError::AlreadySeeded);
    }

    let report = store.seed_defaults().await?;
    writeln!(out, "seeded default catalog")?;
    writeln!(out, "{}", describe(&report))?;
    Ok(())
}

/// Push the current catalog to the remote store.
///
/// # Errors
///
/// Returns `CatalogCommandError` on local failure.
pub async fn sync(store: &CatalogStore, mut out: impl Write) -> Result<(), CatalogCommandError> {
    let report = store.sync().await?;
    writeln!(out, "{}", describe(&report))?;
    Ok(())
}

/// Write the reconciled catalog to `path` as pretty JSON.
///
/// # Errors
///
/// Returns `CatalogCommandError` on load, encode, or write failure.
pub async fn export(
    store: &CatalogStore,
    path: &Path,
    mut out: impl Write,
) -> Result<(), CatalogCommandError> {
    let report = store.load().await?;
    let json = serde_json::to_string_pretty(&report.products)?;
    tokio::fs::write(path, json).await?;
    writeln!(
        out,
        "exported {} products to {}",
        report.products.len(),
        path.display()
    )?;
    Ok(())
}

/// Add a product.
///
/// # Errors
///
/// Returns `CatalogCommandError` for a blank name or a storage failure.
pub async fn add(
    store: &CatalogStore,
    draft: ProductDraft,
    mut out: impl Write,
) -> Result<(), CatalogCommandError> {
    let (product, report) = store.create_product(draft).await?;
    writeln!(out, "added {}", format_row(&product))?;
    writeln!(out, "{}", describe(&report))?;
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns `CatalogCommandError` if `id` is unknown or storage fails.
pub async fn remove(
    store: &CatalogStore,
    id: ProductId,
    mut out: impl Write,
) -> Result<(), CatalogCommandError> {
    let (product, report) = store.delete_product(id).await?;
    writeln!(out, "removed {}", format_row(&product))?;
    writeln!(out, "{}", describe(&report))?;
    Ok(())
}
