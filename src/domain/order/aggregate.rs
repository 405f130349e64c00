//! Order aggregate entity.
//!
//! One checkout attempt, tracked from token issuance through payment
//! resolution. Only `status`, `updated_at` and `raw_notification` change
//! after creation; there is deliberately no way to alter the amount.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, Timestamp, ValidationError};

use super::OrderStatus;

/// A checkout order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    order_id: OrderId,
    customer_name: String,
    customer_contact: String,
    package_id: String,
    amount: i64,
    status: OrderStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    raw_notification: Option<serde_json::Value>,
}

impl Order {
    /// Creates a freshly issued order in `Created` status.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if a customer field or the package id is blank
    /// - `InvalidFormat` if `amount` is not positive
    pub fn create(
        order_id: OrderId,
        customer_name: impl Into<String>,
        customer_contact: impl Into<String>,
        package_id: impl Into<String>,
        amount: i64,
    ) -> Result<Self, ValidationError> {
        let customer_name = customer_name.into();
        let customer_contact = customer_contact.into();
        let package_id = package_id.into();

        if customer_name.trim().is_empty() {
            return Err(ValidationError::empty_field("customer_name"));
        }
        if customer_contact.trim().is_empty() {
            return Err(ValidationError::empty_field("customer_contact"));
        }
        if package_id.trim().is_empty() {
            return Err(ValidationError::empty_field("package_id"));
        }
        if amount <= 0 {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("paid orders require a positive amount, got {}", amount),
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            order_id,
            customer_name,
            customer_contact,
            package_id,
            amount,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
            raw_notification: None,
        })
    }

    /// Creates a stand-in for a notification whose order is not in the store.
    ///
    /// Keeps the audit trail when the store was reset between token issuance
    /// and notification delivery.
    pub fn placeholder(order_id: OrderId, amount: i64) -> Self {
        let now = Timestamp::now();
        Self {
            order_id,
            customer_name: String::new(),
            customer_contact: String::new(),
            package_id: String::new(),
            amount,
            status: OrderStatus::Unknown,
            created_at: now,
            updated_at: now,
            raw_notification: None,
        }
    }

    /// Overwrites status and audit payload, stamping `updated_at`.
    pub fn apply_notification(
        &mut self,
        status: OrderStatus,
        raw_notification: serde_json::Value,
        at: Timestamp,
    ) {
        self.status = status;
        self.raw_notification = Some(raw_notification);
        self.updated_at = at;
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_contact(&self) -> &str {
        &self.customer_contact
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn raw_notification(&self) -> Option<&serde_json::Value> {
        self.raw_notification.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_id() -> OrderId {
        OrderId::new("ORDER-1704067200000-1").unwrap()
    }

    #[test]
    fn create_starts_in_created_status() {
        let order = Order::create(order_id(), "Ana", "0811", "Muqarrar Termin 1", 90_000).unwrap();

        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(order.amount(), 90_000);
        assert_eq!(order.created_at(), order.updated_at());
        assert!(order.raw_notification().is_none());
    }

    #[test]
    fn create_rejects_zero_amount() {
        let result = Order::create(order_id(), "Ana", "0811", "Free Trial", 0);
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn create_rejects_blank_customer_name() {
        let result = Order::create(order_id(), "  ", "0811", "Muqarrar Termin 1", 90_000);
        assert_eq!(result.unwrap_err(), ValidationError::empty_field("customer_name"));
    }

    #[test]
    fn create_rejects_blank_contact() {
        let result = Order::create(order_id(), "Ana", "", "Muqarrar Termin 1", 90_000);
        assert_eq!(result.unwrap_err(), ValidationError::empty_field("customer_contact"));
    }

    #[test]
    fn placeholder_is_unknown_and_anonymous() {
        let order = Order::placeholder(order_id(), 150_000);

        assert_eq!(order.status(), OrderStatus::Unknown);
        assert_eq!(order.amount(), 150_000);
        assert!(order.customer_name().is_empty());
        assert!(order.package_id().is_empty());
    }

    #[test]
    fn apply_notification_updates_status_payload_and_time() {
        let mut order =
            Order::create(order_id(), "Ana", "0811", "Muqarrar Termin 1", 90_000).unwrap();
        let later = Timestamp::from_datetime(*order.updated_at().as_datetime() + chrono::Duration::seconds(5));
        let payload = json!({"transaction_status": "settlement"});

        order.apply_notification(OrderStatus::Paid, payload.clone(), later);

        assert_eq!(order.status(), OrderStatus::Paid);
        assert_eq!(order.updated_at(), later);
        assert_eq!(order.raw_notification(), Some(&payload));
        assert_eq!(order.amount(), 90_000);
    }

    #[test]
    fn order_serializes_flat_fields() {
        let order = Order::create(order_id(), "Ana", "0811", "Muqarrar Termin 1", 90_000).unwrap();
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["order_id"], "ORDER-1704067200000-1");
        assert_eq!(value["status"], "CREATED");
        assert_eq!(value["amount"], 90_000);
        assert!(value.get("raw_notification").is_none());
    }
}
