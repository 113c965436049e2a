//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Reload and list the catalog
//! GET  /products/{id}          - Product detail
//! GET  /products/{id}/order    - Redirect to WhatsApp for this product
//! GET  /search?q=&limit=       - Catalog search
//!
//! # Cart (session)
//! GET  /cart                   - Cart contents
//! POST /cart/add               - Add one unit
//! POST /cart/update            - Change quantity by delta
//! POST /cart/remove            - Remove a line
//! POST /cart/save              - Save for later, returns token
//! POST /cart/restore           - Restore a saved cart
//! GET  /checkout               - Redirect to WhatsApp with the order
//!
//! # Contact
//! GET  /contact                - Redirect to a general enquiry chat
//! POST /contact/inquiry        - Contact form to WhatsApp link
//! POST /bookings               - Service booking to WhatsApp link
//!
//! # Preferences (session)
//! GET  /preferences/theme      - Current theme
//! PUT  /preferences/theme      - Set light or dark
//! ```

pub mod cart;
pub mod contact;
pub mod preferences;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/order", get(products::order))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/save", post(cart::save))
        .route("/restore", post(cart::restore))
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::contact))
        .route("/inquiry", post(contact::inquiry))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/search", get(search::search))
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout))
        .nest("/contact", contact_routes())
        .route("/bookings", post(contact::booking))
        .route(
            "/preferences/theme",
            get(preferences::get_theme).put(preferences::set_theme),
        )
}
