//! Tomtech Storefront - Public catalog, cart and WhatsApp checkout API.
//!
//! This binary serves the storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework serving JSON
//! - Visitor cart and theme in server-side sessions
//! - Catalog from the realtime database mirror, falling back to the local
//!   cache and then the built-in defaults
//! - Checkout hands the order to WhatsApp; no payments are taken here

#![cfg_attr(not(test), forbid(unsafe_code))]

use tomtech_storefront::config::StorefrontConfig;
use tomtech_storefront::state::AppState;
use tomtech_storefront::telemetry::{init_sentry, init_tracing, shutdown_signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env()?;

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(
        config.sentry_dsn.as_deref(),
        config.sentry_environment.as_deref(),
    );
    init_tracing("tomtech_storefront=info,tower_http=debug");

    let state = AppState::new(config.clone())?;
    if !state.catalog().has_remote() {
        tracing::warn!("REMOTE_DATABASE_URL not set, catalog is local-only");
    }

    // Warm the catalog so the first visitor does not pay for the fallback chain
    let report = state.reload_catalog().await?;
    tracing::info!(
        source = ?report.source,
        products = report.products.len(),
        "catalog ready"
    );

    let app = tomtech_storefront::app(state);

    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
