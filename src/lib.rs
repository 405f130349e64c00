//! Snap Checkout - payment checkout backend
//!
//! Prices packages from a server-side catalog, issues Midtrans Snap payment
//! tokens, and reconciles orders from signed gateway notifications.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
