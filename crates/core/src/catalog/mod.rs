//! Catalog-level logic over product lists.
//!
//! - [`defaults`] - the built-in catalog
//! - [`reconcile`] - overlaying stored records onto the defaults
//! - [`search`] - storefront search

pub mod defaults;
pub mod reconcile;
pub mod search;

use serde::Serialize;

use crate::types::{Product, ProductId};

pub use defaults::default_catalog;
pub use reconcile::{ProductRecord, reconcile, reconcile_all};
pub use search::{MAX_RESULTS, MIN_QUERY_LEN, search};

/// Identifier for the next product: one past the current maximum, or 1.
#[must_use]
pub fn next_product_id(products: &[Product]) -> ProductId {
    products
        .iter()
        .map(|product| product.id)
        .max()
        .map_or_else(|| ProductId::new(1), |id| id.next())
}

/// Look up a product by identifier.
#[must_use]
pub fn find(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|product| product.id == id)
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub featured: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
}

impl CatalogStats {
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |mut stats, product| {
            stats.total += 1;
            if product.featured {
                stats.featured += 1;
            }
            if product.availability.is_in_stock() {
                stats.in_stock += 1;
            } else {
                stats.out_of_stock += 1;
            }
            stats
        })
    }
}
