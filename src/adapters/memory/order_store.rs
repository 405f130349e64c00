//! In-memory order store.
//!
//! Orders live in a map of per-order mutexes. The outer `RwLock` is held
//! only long enough to find or insert an entry; each read-modify-write
//! then runs under that order's own lock, so updates for one order are
//! serialized while different orders proceed in parallel.
//!
//! State is lost on restart. Production deployments plug a durable store
//! in behind the same port.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, OrderId};
use crate::domain::order::Order;
use crate::ports::{OrderMutator, OrderStore};

type OrderSlot = Arc<Mutex<Order>>;

/// Process-local order store.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryOrderStore::new());
/// store.create(&order).await?;
/// assert_eq!(store.len().await, 1);
/// ```
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, OrderSlot>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }

    async fn slot(&self, order_id: &OrderId) -> Option<OrderSlot> {
        self.orders.read().await.get(order_id).cloned()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(order.order_id()) {
            return Err(DomainError::new(
                ErrorCode::OrderAlreadyExists,
                format!("Order {} already exists", order.order_id()),
            )
            .with_detail("order_id", order.order_id().as_str()));
        }
        orders.insert(order.order_id().clone(), Arc::new(Mutex::new(order.clone())));
        Ok(())
    }

    async fn get(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError> {
        match self.slot(order_id).await {
            Some(slot) => Ok(Some(slot.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        order_id: &OrderId,
        mutator: OrderMutator<'_>,
    ) -> Result<Order, DomainError> {
        let slot = self.slot(order_id).await.ok_or_else(|| {
            DomainError::new(ErrorCode::OrderNotFound, "Order not found")
                .with_detail("order_id", order_id.as_str())
        })?;
        let mut order = slot.lock().await;
        mutator(&mut order);
        Ok(order.clone())
    }

    async fn upsert(
        &self,
        order_id: &OrderId,
        seed: Order,
        mutator: OrderMutator<'_>,
    ) -> Result<Order, DomainError> {
        let mut order = match self.slot(order_id).await {
            Some(slot) => slot.lock_owned().await,
            None => {
                let mut orders = self.orders.write().await;
                match orders.get(order_id) {
                    Some(slot) => {
                        let slot = Arc::clone(slot);
                        drop(orders);
                        slot.lock_owned().await
                    }
                    None => {
                        // Locked before it is published, so no reader sees the bare seed.
                        let slot = Arc::new(Mutex::new(seed));
                        let guard = Arc::clone(&slot).lock_owned().await;
                        orders.insert(order_id.clone(), slot);
                        guard
                    }
                }
            }
        };
        mutator(&mut order);
        Ok(order.clone())
    }
}
