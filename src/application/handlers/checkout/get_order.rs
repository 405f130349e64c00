//! GetOrderHandler - Query handler for order status lookups.

use std::sync::Arc;

use crate::domain::foundation::OrderId;
use crate::domain::order::{CheckoutError, Order};
use crate::ports::OrderStore;

/// Query for a single order.
#[derive(Debug, Clone)]
pub struct GetOrderQuery {
    pub order_id: String,
}

/// Handler for retrieving an order by id.
pub struct GetOrderHandler {
    order_store: Arc<dyn OrderStore>,
}

impl GetOrderHandler {
    pub fn new(order_store: Arc<dyn OrderStore>) -> Self {
        Self { order_store }
    }

    pub async fn handle(&self, query: GetOrderQuery) -> Result<Order, CheckoutError> {
        let order_id = OrderId::new(query.order_id.as_str())
            .map_err(|_| CheckoutError::OrderNotFound(query.order_id.clone()))?;

        self.order_store
            .get(&order_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound(query.order_id))
    }
}
