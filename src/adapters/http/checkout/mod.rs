//! Checkout HTTP adapter.
//!
//! Exposes token issuance, gateway notifications and order lookups.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{CheckoutApiError, CheckoutAppState, WebhookApiError};
pub use routes::{checkout_router, checkout_routes};
