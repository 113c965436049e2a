//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Health check
//!
//! # Auth
//! POST   /auth/login              - Username and password login
//! POST   /auth/logout             - Logout
//!
//! # Catalog editor (login required)
//! GET    /api/products            - Reload and list the catalog
//! POST   /api/products            - Create from a draft
//! PUT    /api/products/{id}       - Overwrite editor fields
//! DELETE /api/products/{id}       - Remove
//! GET    /api/stats               - Dashboard counts
//!
//! # Settings (login required)
//! GET    /api/settings/whatsapp   - Order number in effect
//! PUT    /api/settings/whatsapp   - Override the order number
//! ```

pub mod auth;
pub mod products;
pub mod settings;
pub mod stats;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the authenticated API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route("/products/{id}", put(products::update).delete(products::delete))
        .route("/stats", get(stats::show))
        .route(
            "/settings/whatsapp",
            get(settings::show_whatsapp).put(settings::update_whatsapp),
        )
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .nest("/api", api_routes())
}
