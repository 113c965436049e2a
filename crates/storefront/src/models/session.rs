//! Types stored in, or rendered from, the visitor session.

use serde::{Deserialize, Serialize};
use tomtech_core::{Cart, Price, ProductId};

/// Session keys for visitor state.
pub mod keys {
    /// The visitor's cart.
    pub const CART: &str = "cart";

    /// Token of the cart last saved for later.
    pub const SAVED_CART_TOKEN: &str = "saved_cart_token";

    /// Light or dark theme preference.
    pub const THEME: &str = "theme";
}

/// Colour theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// One cart line as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub price: Price,
    pub quantity: u32,
    pub line_total: Price,
}

/// Cart as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub total: Price,
    pub currency: String,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, currency: &str) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    product_id: line.product.id,
                    name: line.product.name.clone(),
                    image: line.product.primary_image().to_string(),
                    price: line.product.price,
                    quantity: line.quantity,
                    line_total: line.line_total(),
                })
                .collect(),
            item_count: cart.item_count(),
            total: cart.total(),
            currency: currency.to_string(),
        }
    }
}
