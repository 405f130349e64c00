//! Order id generation port.
//!
//! Global uniqueness is the only hard requirement. Implementations that
//! also need ids to be unguessable should draw them from a cryptographic
//! random source.

use crate::domain::foundation::OrderId;

/// Produces fresh, never-reused order ids.
pub trait OrderIdGenerator: Send + Sync {
    fn next_id(&self) -> OrderId;
}
