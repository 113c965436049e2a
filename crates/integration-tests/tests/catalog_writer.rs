//! Editor writes: persistence, remote mirroring, and the recreate bound.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use tomtech_core::{Availability, Price, ProductDraft, ProductId};
use tomtech_integration_tests::{remote_config, store, store_with_client};
use tomtech_storefront::catalog::{CatalogSource, RemoteSync};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn draft(name: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price: Price::from_units(3500),
        description: "H4 LED bulbs, pair".to_string(),
        category: Some("Lighting".to_string()),
        tags: vec!["led".to_string()],
        availability: Availability::InStock,
        featured: false,
        images: Vec::new(),
    }
}

async fn mount_empty_remote(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_added_product_gets_next_id_and_persists() {
    let dir = tempfile::tempdir().unwrap();

    let (product, report) = store(dir.path(), None)
        .create_product(draft("LED HEADLIGHT KIT"))
        .await
        .unwrap();
    assert_eq!(product.id, ProductId::new(7));
    assert_eq!(report.remote, RemoteSync::NotConfigured);

    // A fresh store over the same directory sees the edit
    let reloaded = store(dir.path(), None).load().await.unwrap();
    assert_eq!(reloaded.source, CatalogSource::LocalCache);
    assert_eq!(reloaded.products.len(), 7);
    assert_eq!(reloaded.products[6].name, "LED HEADLIGHT KIT");
}

#[tokio::test]
async fn test_edit_is_mirrored_to_remote() {
    let server = MockServer::start().await;
    mount_empty_remote(&server).await;
    Mock::given(method("PUT"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path(), Some(remote_config(&server.uri(), 1)));

    // First PUT seeds defaults during load, second carries the edit
    let (_, report) = store.create_product(draft("LED HEADLIGHT KIT")).await.unwrap();
    assert!(report.synced());

    let requests = server.received_requests().await.unwrap();
    let last_put = requests
        .iter()
        .rev()
        .find(|request| request.method.as_str() == "PUT")
        .unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&last_put.body).unwrap();
    assert_eq!(sent.as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_not_found_recreates_exactly_the_configured_number_of_times() {
    let max_recreate_attempts = 2;
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(404))
        .expect(u64::from(max_recreate_attempts) + 1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(u64::from(max_recreate_attempts))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = store_with_client(dir.path(), &remote_config(&server.uri(), max_recreate_attempts));

    let report = store.save(&tomtech_core::catalog::default_catalog()).await.unwrap();

    assert!(matches!(report.remote, RemoteSync::Failed { .. }));
    // The local copy is kept regardless
    assert!(store.has_local_catalog().unwrap());
}

#[tokio::test]
async fn test_recreate_then_retry_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = store_with_client(dir.path(), &remote_config(&server.uri(), 1));

    let report = store.save(&tomtech_core::catalog::default_catalog()).await.unwrap();
    assert_eq!(report.remote, RemoteSync::Synced);
}

#[tokio::test]
async fn test_remote_write_failure_keeps_local_edit() {
    let server = MockServer::start().await;
    mount_empty_remote(&server).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path(), Some(remote_config(&server.uri(), 1)));

    let (product, report) = store.create_product(draft("LED HEADLIGHT KIT")).await.unwrap();
    assert!(!report.synced());

    let local = tomtech_integration_tests::store(dir.path(), None)
        .product(product.id)
        .await
        .unwrap();
    assert_eq!(local.name, "LED HEADLIGHT KIT");
}
