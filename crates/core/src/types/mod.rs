//! Core types for the Tomtech storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod phone;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use phone::{WhatsAppNumber, WhatsAppNumberError};
pub use price::{Price, PriceError};
pub use product::{DraftError, PLACEHOLDER_IMAGE, Product, ProductDraft, parse_tags};
pub use status::*;
