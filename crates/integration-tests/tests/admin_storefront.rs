//! Admin edits as seen by the storefront over a shared data directory.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::Router;
use axum::http::{Method, StatusCode, header};
use serde_json::json;
use tomtech_integration_tests::{
    ADMIN_PASSWORD, ADMIN_USERNAME, admin_config, json_body, request, send, session_cookie,
    storefront_config,
};

fn admin_app(dir: &std::path::Path) -> Router {
    let state = tomtech_admin::state::AppState::new(admin_config(dir)).unwrap();
    tomtech_admin::app(state)
}

fn storefront_app(dir: &std::path::Path) -> Router {
    let state = tomtech_storefront::state::AppState::new(storefront_config(dir)).unwrap();
    tomtech_storefront::app(state)
}

async fn login(admin: &Router, password: &str) -> axum::response::Response {
    send(
        admin,
        request(
            Method::POST,
            "/auth/login",
            None,
            Some(&json!({"username": ADMIN_USERNAME, "password": password})),
        ),
    )
    .await
}

#[tokio::test]
async fn test_unauthenticated_edit_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let admin = admin_app(dir.path());

    let response = send(
        &admin,
        request(
            Method::POST,
            "/api/products",
            None,
            Some(&json!({"name": "LED HEADLIGHT KIT", "price": 3500})),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!dir.path().join("products.json").exists());
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let admin = admin_app(dir.path());

    let response = login(&admin, "not the password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await["error"],
        "invalid username or password"
    );
}

#[tokio::test]
async fn test_admin_edits_reach_storefront() {
    let dir = tempfile::tempdir().unwrap();
    let admin = admin_app(dir.path());
    let storefront = storefront_app(dir.path());

    let response = login(&admin, ADMIN_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);

    let response = send(
        &admin,
        request(
            Method::POST,
            "/api/products",
            Some(&cookie),
            Some(&json!({
                "name": "LED HEADLIGHT KIT",
                "price": 3500,
                "category": "Lighting",
                "tags": ["led"],
                "featured": true,
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["product"]["id"], 7);

    let response = send(&storefront, request(Method::GET, "/products", None, None)).await;
    let body = json_body(response).await;
    assert_eq!(body["source"], "local_cache");
    assert_eq!(body["products"].as_array().unwrap().len(), 7);

    let response = send(&storefront, request(Method::GET, "/search?q=led", None, None)).await;
    let body = json_body(response).await;
    assert!(
        body["results"]
            .as_array()
            .unwrap()
            .iter()
            .any(|product| product["id"] == 7)
    );

    // Order number override set in the admin is used by storefront links
    let response = send(
        &admin,
        request(
            Method::PUT,
            "/api/settings/whatsapp",
            Some(&cookie),
            Some(&json!({"number": "254711000111"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&storefront, request(Method::GET, "/products/7/order", None, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://wa.me/254711000111?text="));
}

#[tokio::test]
async fn test_deleted_product_leaves_storefront() {
    let dir = tempfile::tempdir().unwrap();
    let admin = admin_app(dir.path());
    let storefront = storefront_app(dir.path());

    let cookie = session_cookie(&login(&admin, ADMIN_PASSWORD).await);
    let response = send(
        &admin,
        request(Method::DELETE, "/api/products/5", Some(&cookie), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["remote"]["status"], "not_configured");

    let response = send(&storefront, request(Method::GET, "/products", None, None)).await;
    let body = json_body(response).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 5);

    let response = send(&storefront, request(Method::GET, "/products/5", None, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
