//! Tomtech Admin library.
//!
//! The catalog editor API: password login, product create/update/delete
//! against the shared catalog store, dashboard counts, and the order number
//! setting.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{Router, routing::get};
use tomtech_storefront::middleware::request_id_middleware;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full admin application.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config(), state.session_key());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .with_state(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
