//! Integration tests for Tomtech.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tomtech-integration-tests
//! ```
//!
//! Everything runs in-process: a `wiremock` server stands in for the
//! realtime database, catalogs live in temporary directories, and the
//! routers are driven with `tower::ServiceExt::oneshot`.
//!
//! # Test Categories
//!
//! - `catalog_fallback` - Loader source selection and degradations
//! - `catalog_writer` - Editor writes, remote mirroring, recreate bound
//! - `admin_storefront` - Admin edits seen by the storefront

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, header};
use secrecy::SecretString;
use serde_json::Value;
use tomtech_admin::config::AdminConfig;
use tomtech_core::WhatsAppNumber;
use tomtech_storefront::catalog::CatalogStore;
use tomtech_storefront::config::{
    CatalogConfig, DEFAULT_WHATSAPP_NUMBER, RemoteConfig, StorefrontConfig,
};
use tomtech_storefront::storage::{LocalCache, RealtimeDatabase};

/// Admin login used by [`admin_config`].
pub const ADMIN_USERNAME: &str = "tom";

/// Password matching [`admin_config`]'s hash.
pub const ADMIN_PASSWORD: &str = "correct horse battery";

const SESSION_SECRET: &str = "aB3$kL9#mN2@pQ5&rT8*uW1!xY4^zA7%cE0(fH6)iJ3-lO9+nR2=sV5_gD8~bM1?";

/// The default order number.
#[must_use]
pub fn default_number() -> WhatsAppNumber {
    WhatsAppNumber::parse(DEFAULT_WHATSAPP_NUMBER).unwrap()
}

/// Remote settings pointing at `uri` with a short timeout.
#[must_use]
pub fn remote_config(uri: &str, max_recreate_attempts: u32) -> RemoteConfig {
    let mut config = RemoteConfig::new(uri).unwrap();
    config.timeout = Duration::from_secs(2);
    config.max_recreate_attempts = max_recreate_attempts;
    config
}

/// Remote settings for a port nothing listens on.
#[must_use]
pub fn unreachable_remote() -> RemoteConfig {
    remote_config("http://127.0.0.1:9/", 1)
}

/// Catalog settings over `data_dir`.
#[must_use]
pub fn catalog_config(data_dir: &Path, remote: Option<RemoteConfig>) -> CatalogConfig {
    CatalogConfig {
        remote,
        ..CatalogConfig::local(data_dir, default_number())
    }
}

/// File-backed store over `data_dir`.
#[must_use]
pub fn store(data_dir: &Path, remote: Option<RemoteConfig>) -> CatalogStore {
    CatalogStore::from_config(&catalog_config(data_dir, remote)).unwrap()
}

/// Store with an explicit remote client, bypassing configuration.
#[must_use]
pub fn store_with_client(data_dir: &Path, remote: &RemoteConfig) -> CatalogStore {
    CatalogStore::new(
        LocalCache::open(data_dir),
        Some(RealtimeDatabase::new(remote).unwrap()),
    )
    .with_max_recreate_attempts(remote.max_recreate_attempts)
}

/// Storefront configuration over `data_dir`.
#[must_use]
pub fn storefront_config(data_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "https://tomtech.co.ke/".to_string(),
        currency_label: "KES".to_string(),
        catalog: catalog_config(data_dir, None),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Admin configuration over `data_dir` for [`ADMIN_USERNAME`]/[`ADMIN_PASSWORD`].
#[must_use]
pub fn admin_config(data_dir: &Path) -> AdminConfig {
    AdminConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3001,
        base_url: "http://localhost:3001".to_string(),
        username: ADMIN_USERNAME.to_string(),
        password_hash: SecretString::from(
            tomtech_admin::services::auth::hash_password(ADMIN_PASSWORD).unwrap(),
        ),
        session_secret: SecretString::from(SESSION_SECRET),
        session_timeout_minutes: 30,
        catalog: catalog_config(data_dir, None),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Build a request with an optional cookie and JSON body.
#[must_use]
pub fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send `request` to a clone of `app`.
pub async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    use tower::ServiceExt;
    app.clone().oneshot(request).await.unwrap()
}

/// Decode a JSON response body.
pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `name=value` part of the response's session cookie.
#[must_use]
pub fn session_cookie(response: &axum::response::Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}
