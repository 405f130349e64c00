//! HTTP DTOs (Data Transfer Objects) for checkout endpoints.
//!
//! These types define the JSON request/response structure for the checkout API.
//! They serve as the boundary between HTTP and the application layer.

use serde::Serialize;
use serde_json::Value;

use crate::domain::catalog::Package;
use crate::domain::foundation::Timestamp;
use crate::domain::order::{canonical_string, Order, OrderStatus};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request for a payment token.
///
/// Fields are read one by one from the JSON object, so a wrong type on one
/// field never hides the others. Numbers are accepted in their canonical
/// string form (a phone number sent as `811234` reads as `"811234"`).
/// Unknown fields, including any client-supplied price, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRequest {
    pub customer_name: Option<String>,
    pub customer_contact: Option<String>,
    pub package_id: Option<String>,
}

impl TokenRequest {
    /// Reads the request from a JSON value; anything but an object has no fields.
    pub fn from_json(body: &Value) -> Self {
        let field = |name: &str| body.get(name).and_then(canonical_string);
        Self {
            customer_name: field("customer_name"),
            customer_contact: field("customer_contact"),
            package_id: field("package_id"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Issued payment token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// Acknowledgement returned to the gateway for accepted notifications.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self { received: true }
    }
}

/// Order state as exposed to the storefront.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub package_id: String,
    pub amount: i64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_notification: Option<serde_json::Value>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id().to_string(),
            customer_name: order.customer_name().to_string(),
            customer_contact: order.customer_contact().to_string(),
            package_id: order.package_id().to_string(),
            amount: order.amount(),
            status: order.status(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
            raw_notification: order.raw_notification().cloned(),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct PackageResponse {
    pub package_id: String,
    pub amount: i64,
    pub payable: bool,
}

impl From<&Package> for PackageResponse {
    fn from(package: &Package) -> Self {
        Self {
            package_id: package.package_id.clone(),
            amount: package.amount,
            payable: package.is_payable(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PackagesResponse {
    pub packages: Vec<PackageResponse>,
}

/// Liveness check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub production: bool,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            error_code: error_code.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: message.into(),
            error_code: error_code.into(),
            details: Some(details),
        }
    }
}
