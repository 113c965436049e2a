//! Print WhatsApp order links from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Two OBD cables and one catalytic converter
//! tomtech checkout-link 1 1 5
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` - Storefront URL linked from each order line
//! - `CURRENCY_LABEL` - Currency shown in the message (default: KES)

use std::io::Write;

use thiserror::Error;
use tomtech_core::{Cart, ProductId, WhatsAppNumber, catalog};
use tomtech_storefront::catalog::{CatalogError, CatalogStore};
use tomtech_storefront::checkout::{CheckoutError, MessageFormat, whatsapp_link};
use tomtech_storefront::settings;
use tomtech_storefront::storage::StorageError;

/// Errors from `checkout-link`.
#[derive(Debug, Error)]
pub enum CheckoutCommandError {
    /// Catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Order number override could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No ids were given.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// An id is not in the catalog.
    #[error("product {0} not found")]
    UnknownProduct(ProductId),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build a cart from `ids` (repeat an id for more units) and print its link.
///
/// # Errors
///
/// Returns `CheckoutCommandError` if an id is unknown, `ids` is empty, or
/// the catalog cannot be loaded.
pub async fn checkout_link(
    store: &CatalogStore,
    default_number: &WhatsAppNumber,
    format: &MessageFormat,
    ids: &[ProductId],
    mut out: impl Write,
) -> Result<(), CheckoutCommandError> {
    let products = store.load().await?.products;

    let mut cart = Cart::new();
    for &id in ids {
        let product = catalog::find(&products, id).ok_or(CheckoutCommandError::UnknownProduct(id))?;
        cart.add(product.clone());
    }

    let message = format.order_message(&cart)?;
    let number = settings::whatsapp_number(store.cache(), default_number)?;
    writeln!(out, "{}", whatsapp_link(&number, &message))?;
    Ok(())
}
