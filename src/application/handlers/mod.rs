//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod checkout;

pub use checkout::{
    GetOrderHandler, GetOrderQuery, HandleNotificationCommand, HandleNotificationHandler,
    HandleNotificationResult, RequestTokenCommand, RequestTokenHandler, RequestTokenResult,
};
