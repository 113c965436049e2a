//! Case-insensitive catalog search.

use crate::types::Product;

/// Queries shorter than this (after trimming) match nothing.
pub const MIN_QUERY_LEN: usize = 2;

/// Default result cap for the storefront search box.
pub const MAX_RESULTS: usize = 5;

/// Products whose name, description, category or any tag contains `query`,
/// in catalog order, capped at `limit`.
#[must_use]
pub fn search<'a>(products: &'a [Product], query: &str, limit: usize) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    products
        .iter()
        .filter(|product| matches(product, &needle))
        .take(limit)
        .collect()
}

fn matches(product: &Product, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    contains(&product.name)
        || contains(&product.description)
        || product.category.as_deref().is_some_and(contains)
        || product.tags.iter().any(|tag| contains(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    fn names<'a>(found: &[&'a Product]) -> Vec<&'a str> {
        found.iter().map(|product| product.name.as_str()).collect()
    }

    #[test]
    fn test_short_query_returns_nothing() {
        let products = default_catalog();
        assert!(search(&products, "o", MAX_RESULTS).is_empty());
        assert!(search(&products, "  c  ", MAX_RESULTS).is_empty());
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let products = default_catalog();
        assert_eq!(
            names(&search(&products, "catalytic", MAX_RESULTS)),
            vec!["CATALYTIC CONVERTER"]
        );
    }

    #[test]
    fn test_matches_category_and_tags() {
        let products = default_catalog();
        assert_eq!(search(&products, "exhaust systems", MAX_RESULTS).len(), 1);
        assert_eq!(
            names(&search(&products, "AUTEL", MAX_RESULTS)),
            vec!["AUTEL OBDII CABLE"]
        );
    }

    #[test]
    fn test_limit() {
        let products = default_catalog();
        assert_eq!(search(&products, "diagnostic", 2).len(), 2);
    }
}
