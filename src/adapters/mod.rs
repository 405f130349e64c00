//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum REST endpoints
//! - `memory` - In-memory order store
//! - `midtrans` - Snap payment gateway client and test double
//! - `ids` - Order id generators

pub mod http;
pub mod ids;
pub mod memory;
pub mod midtrans;

pub use ids::{TimestampOrderIdGenerator, UuidOrderIdGenerator};
pub use memory::InMemoryOrderStore;
pub use midtrans::{MockPaymentGateway, SnapConfig, SnapGatewayAdapter};
