//! Order store port.
//!
//! Defines the contract for persisting and mutating Order aggregates.
//!
//! # Design
//!
//! - **Closure updates**: callers pass a mutator instead of a whole order, so
//!   the store can hold a per-order lock (or run a transaction) around the
//!   read-modify-write
//! - **Linearizable per order**: two concurrent updates for the same
//!   `order_id` never interleave; updates for different ids are independent
//! - **Append-only**: there is no delete operation
//!
//! # Example
//!
//! ```ignore
//! async fn mark_paid(store: &dyn OrderStore, id: &OrderId, raw: Value) -> Result<Order, DomainError> {
//!     store
//!         .update(id, Box::new(move |order| {
//!             order.apply_notification(OrderStatus::Paid, raw, Timestamp::now());
//!         }))
//!         .await
//! }
//! ```

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::order::Order;
use async_trait::async_trait;

/// In-place mutation applied to a stored order under the store's lock.
pub type OrderMutator<'a> = Box<dyn FnOnce(&mut Order) + Send + 'a>;

/// Store port for Order aggregate persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order.
    ///
    /// # Errors
    ///
    /// - `OrderAlreadyExists` if the id is already stored
    /// - `DatabaseError` on persistence failure
    async fn create(&self, order: &Order) -> Result<(), DomainError>;

    /// Fetch an order by id.
    ///
    /// Returns `None` if not found.
    async fn get(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Atomically mutate an existing order and return the result.
    ///
    /// # Errors
    ///
    /// - `OrderNotFound` if no order has this id
    /// - `DatabaseError` on persistence failure
    async fn update(
        &self,
        order_id: &OrderId,
        mutator: OrderMutator<'_>,
    ) -> Result<Order, DomainError>;

    /// Atomically mutate an order, inserting `seed` first if it is absent.
    ///
    /// The seed is never visible on its own: a concurrent `get` or `upsert`
    /// for the same id observes either nothing or an order the mutator has
    /// already run on. Exactly one caller's mutator ever sees the seed.
    async fn upsert(
        &self,
        order_id: &OrderId,
        seed: Order,
        mutator: OrderMutator<'_>,
    ) -> Result<Order, DomainError>;
}
