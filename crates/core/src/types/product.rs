//! Product record and editor draft.

use serde::{Deserialize, Serialize};

use super::{Availability, Price, ProductId};

/// Image used when a product has none.
pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.jpg";

/// A catalog product.
///
/// This is the shape persisted in the local cache and the remote store.
/// Keys are camelCase; optional keys that are missing deserialize to their
/// empty value so that partially-populated remote records still load.
/// Stored records are merged with the defaults before decoding, see
/// [`crate::catalog::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
    /// Serialized as `null` when unset so a cleared category is kept.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub featured: bool,
    /// Primary image. Older records only carry this field.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// The image shown in listings: `image`, else the first of `images`,
    /// else the placeholder.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Category label, `Uncategorized` when none is set.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("Uncategorized")
    }

    /// Long-form description, falling back to the short one.
    #[must_use]
    pub fn long_description(&self) -> &str {
        self.full_description
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(&self.description)
    }

    /// Overlay editor fields onto this product, keeping its identifier and
    /// narrative fields.
    pub fn apply_draft(&mut self, draft: ProductDraft) {
        let images = draft.normalized_images();
        self.name = draft.name.trim().to_owned();
        self.price = draft.price;
        self.description = draft.description;
        self.category = draft.category.filter(|c| !c.trim().is_empty());
        self.tags = draft.tags;
        self.availability = draft.availability;
        self.featured = draft.featured;
        self.image = images.first().cloned();
        self.images = images;
    }
}

/// Errors that can occur when validating a [`ProductDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Name is empty or whitespace.
    #[error("product name cannot be empty")]
    EmptyName,
}

/// Fields submitted by the product editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductDraft {
    /// Check the draft can become a product.
    ///
    /// # Errors
    ///
    /// Returns `DraftError::EmptyName` if the name is blank.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        Ok(())
    }

    /// Build a new product with the given identifier.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        let images = self.normalized_images();
        Product {
            id,
            name: self.name.trim().to_owned(),
            price: self.price,
            description: self.description,
            full_description: None,
            importance: None,
            category: self.category.filter(|c| !c.trim().is_empty()),
            tags: self.tags,
            availability: self.availability,
            featured: self.featured,
            image: images.first().cloned(),
            images,
        }
    }

    fn normalized_images(&self) -> Vec<String> {
        let images: Vec<String> = self
            .images
            .iter()
            .map(|image| image.trim())
            .filter(|image| !image.is_empty())
            .map(str::to_owned)
            .collect();
        if images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_owned()]
        } else {
            images
        }
    }
}

/// Split comma-separated tag input, trimming and dropping empty entries.
///
/// ```
/// use tomtech_core::parse_tags;
///
/// assert_eq!(parse_tags(" OBD, cable ,,diagnostic "), vec!["OBD", "cable", "diagnostic"]);
/// ```
#[must_use]
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            price: Price::from_units(1500),
            description: "Bright LED bulbs".to_owned(),
            category: Some("Lighting".to_owned()),
            tags: parse_tags("led, bulbs"),
            availability: Availability::InStock,
            featured: true,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let product: Product =
            serde_json::from_str(r#"{"id": 9, "name": "Wiper", "price": 800}"#).unwrap();
        assert_eq!(product.id, ProductId::new(9));
        assert_eq!(product.description, "");
        assert!(product.tags.is_empty());
        assert_eq!(product.availability, Availability::InStock);
        assert!(!product.featured);
        assert_eq!(product.primary_image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_camel_case_keys() {
        let mut product = draft("Bulb").into_product(ProductId::new(1));
        product.full_description = Some("Long".to_owned());
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("fullDescription").is_some());
        assert!(value.get("full_description").is_none());
    }

    #[test]
    fn test_draft_without_images_gets_placeholder() {
        let product = draft("Bulb").into_product(ProductId::new(8));
        assert_eq!(product.images, vec![PLACEHOLDER_IMAGE.to_owned()]);
        assert_eq!(product.image.as_deref(), Some(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn test_draft_validation() {
        assert_eq!(draft("  ").validate(), Err(DraftError::EmptyName));
        assert!(draft("Bulb").validate().is_ok());
    }

    #[test]
    fn test_apply_draft_keeps_id_and_narrative() {
        let mut product = draft("Bulb").into_product(ProductId::new(3));
        product.importance = Some("Be seen at night.".to_owned());

        let mut update = draft("Bulb Pro");
        update.images = vec!["images/bulb-pro.jpg".to_owned()];
        product.apply_draft(update);

        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.name, "Bulb Pro");
        assert_eq!(product.importance.as_deref(), Some("Be seen at night."));
        assert_eq!(product.primary_image(), "images/bulb-pro.jpg");
    }

    #[test]
    fn test_long_description_fallback() {
        let mut product = draft("Bulb").into_product(ProductId::new(1));
        assert_eq!(product.long_description(), "Bright LED bulbs");
        product.full_description = Some("Very bright LED bulbs".to_owned());
        assert_eq!(product.long_description(), "Very bright LED bulbs");
    }
}
