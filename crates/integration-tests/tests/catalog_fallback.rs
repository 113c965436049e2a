//! Loader source selection: remote, then local cache, then defaults.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use tomtech_core::{Price, Product};
use tomtech_core::catalog::default_catalog;
use tomtech_integration_tests::{remote_config, store, unreachable_remote};
use tomtech_storefront::catalog::{CatalogSource, Degradation};
use tomtech_storefront::storage::keys;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cached_products(dir: &std::path::Path) -> Vec<Product> {
    let text = std::fs::read_to_string(dir.join(format!("{}.json", keys::PRODUCTS))).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[tokio::test]
async fn test_unreachable_remote_and_empty_cache_yield_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path(), Some(unreachable_remote()));

    let report = store.load().await.unwrap();

    assert_eq!(report.source, CatalogSource::Defaults);
    assert_eq!(report.products, default_catalog());
    assert!(matches!(
        report.degradations[0],
        Degradation::RemoteUnavailable { .. }
    ));
    assert_eq!(report.degradations[1], Degradation::CacheMissing);

    // Defaults are persisted for the next load
    assert_eq!(cached_products(dir.path()), default_catalog());
    assert!(store.last_update().unwrap().is_some());
}

#[tokio::test]
async fn test_second_load_uses_cache() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path(), None);

    store.load().await.unwrap();
    let report = store.load().await.unwrap();

    assert_eq!(report.source, CatalogSource::LocalCache);
    assert_eq!(report.degradations, vec![Degradation::RemoteNotConfigured]);
    assert_eq!(report.products.len(), 6);
}

#[tokio::test]
async fn test_remote_object_payload_overwrites_cache() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "-Nx1": {"id": 1, "name": "OBD II(16PIN)", "price": 2500},
        "-Nx2": {"id": 9, "name": "WIPER BLADES", "price": 800, "availability": "out_of_stock"},
    });
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    // Seed the cache so the remote has something to replace
    store(dir.path(), None).load().await.unwrap();
    std::fs::write(
        dir.path()
            .join(format!("{}.json", keys::PRODUCTS_LAST_UPDATE)),
        "1",
    )
    .unwrap();

    let store = store(dir.path(), Some(remote_config(&server.uri(), 1)));
    let report = store.load().await.unwrap();

    assert_eq!(report.source, CatalogSource::Remote);
    assert!(report.degradations.is_empty());
    assert_eq!(report.products.len(), 2);

    let obd = report.products.iter().find(|p| p.id.as_u32() == 1).unwrap();
    assert_eq!(obd.price, Price::from_units(2500));
    // Narrative fields are backfilled from the default record
    assert!(obd.full_description.is_some());

    let cached = cached_products(dir.path());
    assert_eq!(cached, report.products);
    assert!(cached.iter().any(|p| p.name == "WIPER BLADES"));
    assert!(store.last_update().unwrap().unwrap() > 1);
}

#[tokio::test]
async fn test_remote_timeout_falls_back_to_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(default_catalog())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    store(dir.path(), None).load().await.unwrap();

    let report = store(dir.path(), Some(remote_config(&server.uri(), 1)))
        .load()
        .await
        .unwrap();

    assert_eq!(report.source, CatalogSource::LocalCache);
    assert_eq!(report.degradations.len(), 1);
    assert!(matches!(
        report.degradations[0],
        Degradation::RemoteUnavailable { .. }
    ));
    assert_eq!(report.products, default_catalog());
}

#[tokio::test]
async fn test_invalid_remote_record_keeps_cache() {
    let server = MockServer::start().await;
    let body = serde_json::json!([{"id": 1, "name": "OBD II(16PIN)", "price": -5}]);
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    store(dir.path(), None).load().await.unwrap();

    let report = store(dir.path(), Some(remote_config(&server.uri(), 1)))
        .load()
        .await
        .unwrap();

    assert_eq!(report.source, CatalogSource::LocalCache);
    assert!(matches!(
        report.degradations[0],
        Degradation::RemoteUnavailable { .. }
    ));
    assert_eq!(cached_products(dir.path()), default_catalog());
}

#[tokio::test]
async fn test_empty_remote_falls_back_to_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    store(dir.path(), None).load().await.unwrap();

    let report = store(dir.path(), Some(remote_config(&server.uri(), 1)))
        .load()
        .await
        .unwrap();

    assert_eq!(report.source, CatalogSource::LocalCache);
    assert_eq!(report.degradations, vec![Degradation::RemoteEmpty]);
}

#[tokio::test]
async fn test_corrupt_cache_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("products.json"), "{ not json").unwrap();

    let report = store(dir.path(), None).load().await.unwrap();

    assert_eq!(report.source, CatalogSource::Defaults);
    assert!(matches!(
        report.degradations[1],
        Degradation::CacheCorrupt { .. }
    ));
    assert_eq!(cached_products(dir.path()), default_catalog());
}
