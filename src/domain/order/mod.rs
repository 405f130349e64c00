//! Order domain module.
//!
//! The order lifecycle from token issuance through gateway notifications,
//! plus the signature check that guards every notification.

mod aggregate;
mod errors;
mod notification;
mod signature;
mod status;
mod webhook_errors;

pub use aggregate::Order;
pub use errors::CheckoutError;
pub use notification::{canonical_string, parse_whole_amount, PaymentNotification, SignedFields};
pub use signature::{server_key_configured, SignatureVerifier};
pub use status::OrderStatus;
pub use webhook_errors::WebhookError;
