//! Midtrans payment gateway adapters.
//!
//! - `SnapGatewayAdapter` - Snap transactions API over HTTPS
//! - `MockPaymentGateway` - In-process stand-in for tests and local runs

mod mock_gateway;
mod snap_adapter;

pub use mock_gateway::MockPaymentGateway;
pub use snap_adapter::{SnapConfig, SnapGatewayAdapter};
