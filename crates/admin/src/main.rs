//! Tomtech Admin - Catalog editor API.
//!
//! This binary serves the admin API on port 3001. Keep it off the public
//! internet; it trusts a single configured editor account.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tomtech_admin::config::AdminConfig;
use tomtech_admin::state::AppState;
use tomtech_storefront::telemetry::{init_sentry, init_tracing, shutdown_signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (needed for Sentry init)
    let config = AdminConfig::from_env()?;

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(
        config.sentry_dsn.as_deref(),
        config.sentry_environment.as_deref(),
    );
    init_tracing("tomtech_admin=info,tomtech_storefront=info,tower_http=debug");

    let state = AppState::new(config.clone())?;
    if !state.catalog().has_remote() {
        tracing::warn!("REMOTE_DATABASE_URL not set, edits stay local");
    }

    let app = tomtech_admin::app(state);

    let addr = config.socket_addr();
    tracing::info!("admin listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
