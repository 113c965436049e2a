//! Tomtech Core - Shared catalog and cart logic.
//!
//! This crate provides the domain types and pure logic used by every
//! Tomtech component:
//! - `storefront` - Public catalog, cart and WhatsApp checkout API
//! - `admin` - Product editor behind a login
//! - `cli` - Command-line tools for seeding and syncing the catalog
//!
//! # Architecture
//!
//! The core crate contains only types and functions - no file access, no
//! HTTP clients. Persistence lives in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Product record, price, availability, WhatsApp number
//! - [`catalog`] - Default catalog, reconciliation, search and stats
//! - [`cart`] - Session cart math

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartLine};
pub use catalog::CatalogStats;
pub use types::*;
