//! Carts saved for later.
//!
//! A saved cart is a snapshot stored in the local cache under a random
//! token. The token is handed back to the visitor (and remembered in their
//! session) so the cart can be restored after the session ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tomtech_core::Cart;
use uuid::Uuid;

use crate::storage::{LocalCache, StorageError, keys};

/// Errors from saving or restoring a cart.
#[derive(Debug, Error)]
pub enum SavedCartError {
    /// Refusing to save nothing.
    #[error("cannot save an empty cart")]
    EmptyCart,

    /// No snapshot under this token.
    #[error("no saved cart for this token")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedCart {
    cart: Cart,
    saved_at: DateTime<Utc>,
}

/// Store a snapshot of `cart` and return its token.
///
/// # Errors
///
/// Returns [`SavedCartError::EmptyCart`] for an empty cart, or a storage error.
pub fn save_cart(cache: &LocalCache, cart: &Cart) -> Result<Uuid, SavedCartError> {
    if cart.is_empty() {
        return Err(SavedCartError::EmptyCart);
    }

    let token = Uuid::new_v4();
    let snapshot = SavedCart {
        cart: cart.clone(),
        saved_at: Utc::now(),
    };
    cache.set(&keys::saved_cart(&token), &snapshot)?;
    tracing::debug!(%token, items = cart.item_count(), "cart saved for later");
    Ok(token)
}

/// Read back the cart saved under `token`.
///
/// # Errors
///
/// Returns [`SavedCartError::NotFound`] if nothing is stored under the token
/// or the snapshot is unreadable, or a storage error.
pub fn load_cart(cache: &LocalCache, token: &Uuid) -> Result<Cart, SavedCartError> {
    match cache.get::<SavedCart>(&keys::saved_cart(token)) {
        Ok(Some(snapshot)) => Ok(snapshot.cart),
        Ok(None) => Err(SavedCartError::NotFound),
        Err(err) if err.is_corrupt() => {
            tracing::warn!(%token, error = %err, "saved cart is unreadable");
            Err(SavedCartError::NotFound)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tomtech_core::catalog::default_catalog;

    use super::*;

    #[test]
    fn test_save_and_load() {
        let cache = LocalCache::in_memory();
        let mut cart = Cart::new();
        cart.add(default_catalog()[2].clone());
        cart.add(default_catalog()[2].clone());

        let token = save_cart(&cache, &cart).unwrap();

        assert_eq!(load_cart(&cache, &token).unwrap(), cart);
    }

    #[test]
    fn test_empty_cart_is_not_saved() {
        let cache = LocalCache::in_memory();
        assert!(matches!(
            save_cart(&cache, &Cart::new()),
            Err(SavedCartError::EmptyCart)
        ));
    }

    #[test]
    fn test_unknown_token() {
        let cache = LocalCache::in_memory();
        assert!(matches!(
            load_cart(&cache, &Uuid::new_v4()),
            Err(SavedCartError::NotFound)
        ));
    }

    #[test]
    fn test_corrupt_snapshot_is_not_found() {
        let cache = LocalCache::in_memory();
        let token = Uuid::new_v4();
        cache.set(&keys::saved_cart(&token), &42).unwrap();
        assert!(matches!(
            load_cart(&cache, &token),
            Err(SavedCartError::NotFound)
        ));
    }
}
