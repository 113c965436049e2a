//! Merging stored product records with their default-catalog counterparts.
//!
//! A stored or fetched record is overlaid onto the default record with the
//! same identifier or the same name. Every key the record carries wins, even
//! when its value is empty, so an editor can clear a default's tags or
//! category. Keys it lacks come from the default. The two narrative fields,
//! `fullDescription` and `importance`, are the exception: a null or empty
//! value there is backfilled from the default as well.
//!
//! Records are merged as raw JSON objects so that a missing key and an
//! empty value stay distinguishable until the record is decoded.

use serde_json::{Map, Value};

use crate::types::Product;

/// A product as stored in the local cache or the remote mirror.
pub type ProductRecord = Map<String, Value>;

const NARRATIVE_KEYS: [&str; 2] = ["fullDescription", "importance"];

/// Find the default counterpart of `record`: the first default whose
/// identifier or name matches.
#[must_use]
pub fn find_default<'a>(record: &ProductRecord, defaults: &'a [Product]) -> Option<&'a Product> {
    let id = record.get("id").and_then(Value::as_u64);
    let name = record.get("name").and_then(Value::as_str);
    defaults.iter().find(|candidate| {
        id == Some(u64::from(candidate.id.as_u32())) || name == Some(candidate.name.as_str())
    })
}

/// Reconcile one record against the default catalog and decode it.
///
/// Records without a default counterpart are decoded unchanged.
///
/// # Errors
///
/// Returns a `serde_json::Error` if the merged record is not a valid product.
pub fn reconcile(record: ProductRecord, defaults: &[Product]) -> Result<Product, serde_json::Error> {
    let Some(default) = find_default(&record, defaults) else {
        return serde_json::from_value(Value::Object(record));
    };

    let mut merged = match serde_json::to_value(default)? {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    for (key, value) in record {
        if NARRATIVE_KEYS.contains(&key.as_str()) && is_blank(&value) {
            continue;
        }
        merged.insert(key, value);
    }
    serde_json::from_value(Value::Object(merged))
}

/// Reconcile every record, preserving order.
///
/// # Errors
///
/// Returns the first decoding failure.
pub fn reconcile_all(
    records: Vec<ProductRecord>,
    defaults: &[Product],
) -> Result<Vec<Product>, serde_json::Error> {
    records
        .into_iter()
        .map(|record| reconcile(record, defaults))
        .collect()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
