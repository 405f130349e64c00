//! Checkout handlers.
//!
//! ## Commands
//! - Issuing payment tokens for catalog packages
//! - Applying verified gateway notifications
//!
//! ## Queries
//! - Order status lookup

mod get_order;
mod handle_notification;
mod request_token;

// Commands
pub use handle_notification::{
    HandleNotificationCommand, HandleNotificationHandler, HandleNotificationResult,
};
pub use request_token::{RequestTokenCommand, RequestTokenHandler, RequestTokenResult};

// Queries
pub use get_order::{GetOrderHandler, GetOrderQuery};
