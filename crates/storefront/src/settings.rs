//! Shop settings kept in the local cache.

use tomtech_core::WhatsAppNumber;

use crate::storage::{LocalCache, StorageError, keys};

/// The number orders go to: the stored override, else `default`.
///
/// An unreadable override is logged and ignored.
///
/// # Errors
///
/// Returns [`StorageError`] if the cache cannot be read.
pub fn whatsapp_number(
    cache: &LocalCache,
    default: &WhatsAppNumber,
) -> Result<WhatsAppNumber, StorageError> {
    match cache.get::<WhatsAppNumber>(keys::WHATSAPP_NUMBER) {
        Ok(Some(number)) => Ok(number),
        Ok(None) => Ok(default.clone()),
        Err(err) if err.is_corrupt() => {
            tracing::warn!(error = %err, "stored whatsapp number is invalid, using default");
            Ok(default.clone())
        }
        Err(err) => Err(err),
    }
}

/// Store an override for the order number.
///
/// # Errors
///
/// Returns [`StorageError`] if the cache cannot be written.
pub fn set_whatsapp_number(cache: &LocalCache, number: &WhatsAppNumber) -> Result<(), StorageError> {
    cache.set(keys::WHATSAPP_NUMBER, number)?;
    tracing::info!(number = %number, "whatsapp number updated");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn default_number() -> WhatsAppNumber {
        WhatsAppNumber::parse("254702466009").unwrap()
    }

    #[test]
    fn test_default_when_unset() {
        let cache = LocalCache::in_memory();
        assert_eq!(whatsapp_number(&cache, &default_number()).unwrap(), default_number());
    }

    #[test]
    fn test_override_wins() {
        let cache = LocalCache::in_memory();
        let number = WhatsAppNumber::parse("+254 711 222 333").unwrap();
        set_whatsapp_number(&cache, &number).unwrap();

        assert_eq!(whatsapp_number(&cache, &default_number()).unwrap(), number);
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        let cache = LocalCache::in_memory();
        cache.set(keys::WHATSAPP_NUMBER, "call me").unwrap();
        assert_eq!(whatsapp_number(&cache, &default_number()).unwrap(), default_number());
    }
}
