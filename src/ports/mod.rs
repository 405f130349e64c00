//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OrderStore` - Order persistence with atomic per-order updates
//! - `PaymentGateway` - Token creation at the external payment gateway
//! - `OrderIdGenerator` - Pluggable order id strategy

mod order_id_generator;
mod order_store;
mod payment_gateway;

pub use order_id_generator::OrderIdGenerator;
pub use order_store::{OrderMutator, OrderStore};
pub use payment_gateway::{
    CustomerDetails, GatewayError, GatewayErrorCode, ItemDetails, PaymentGateway,
    TransactionDetails, TransactionRequest, TransactionToken,
};
