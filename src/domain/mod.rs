//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `catalog` - Server-authoritative package prices
//! - `order` - Order lifecycle, gateway notifications and signature verification

pub mod catalog;
pub mod foundation;
pub mod order;
