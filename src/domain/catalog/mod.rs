//! Catalog domain module.
//!
//! Server-authoritative prices for purchasable packages. Client-submitted
//! prices are never consulted anywhere in the checkout flow.

mod price_catalog;

pub use price_catalog::{CatalogError, Package, PriceCatalog};
