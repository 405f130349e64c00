//! Payment gateway port for hosted-checkout token creation.
//!
//! The gateway exposes a single synchronous operation to this service:
//! exchange transaction details for a short-lived token that the client
//! hands to the gateway's own payment UI. Outcomes arrive later through
//! the webhook, never through this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for payment gateway integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mint a payment token for a transaction.
    ///
    /// No retries happen inside implementations; the caller decides.
    async fn create_transaction_token(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionToken, GatewayError>;
}

/// Transaction parameters in the gateway's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub transaction_details: TransactionDetails,
    pub customer_details: CustomerDetails,
    pub item_details: Vec<ItemDetails>,
}

impl TransactionRequest {
    /// Builds a single-item transaction for one package.
    pub fn single_item(
        order_id: impl Into<String>,
        amount: i64,
        customer_name: impl Into<String>,
        customer_contact: impl Into<String>,
        package_id: impl Into<String>,
    ) -> Self {
        let package_id = package_id.into();
        Self {
            transaction_details: TransactionDetails {
                order_id: order_id.into(),
                gross_amount: amount,
            },
            customer_details: CustomerDetails {
                first_name: customer_name.into(),
                phone: customer_contact.into(),
            },
            item_details: vec![ItemDetails {
                id: package_id.clone(),
                price: amount,
                quantity: 1,
                name: package_id,
            }],
        }
    }

    pub fn order_id(&self) -> &str {
        &self.transaction_details.order_id
    }

    pub fn gross_amount(&self) -> i64 {
        self.transaction_details.gross_amount
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub order_id: String,
    pub gross_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub id: String,
    pub price: i64,
    pub quantity: u32,
    pub name: String,
}

/// Token returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionToken {
    /// Opaque token for the gateway's client-side UI.
    pub token: String,

    /// Hosted payment page, when the gateway provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    /// Error code for categorization.
    pub code: GatewayErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Gateway's own status code, if it returned one.
    pub provider_code: Option<String>,

    /// Whether resubmitting may succeed.
    pub retryable: bool,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Timeout, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::AuthenticationError, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::ProviderError, message)
    }

    pub fn not_configured() -> Self {
        Self::new(
            GatewayErrorCode::NotConfigured,
            "payment gateway server key is not configured",
        )
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Gateway did not answer within the configured bound.
    Timeout,

    /// Server key rejected.
    AuthenticationError,

    /// Gateway rejected the transaction parameters.
    InvalidRequest,

    /// Gateway-side failure (5xx).
    ProviderError,

    /// No server key configured locally.
    NotConfigured,
}

impl GatewayErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayErrorCode::NetworkError
                | GatewayErrorCode::Timeout
                | GatewayErrorCode::ProviderError
        )
    }
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::NetworkError => "network_error",
            GatewayErrorCode::Timeout => "timeout",
            GatewayErrorCode::AuthenticationError => "authentication_error",
            GatewayErrorCode::InvalidRequest => "invalid_request",
            GatewayErrorCode::ProviderError => "provider_error",
            GatewayErrorCode::NotConfigured => "not_configured",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn single_item_request_serializes_to_gateway_shape() {
        let request =
            TransactionRequest::single_item("ORDER-1", 90_000, "Ana", "0811", "Muqarrar Termin 1");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["transaction_details"]["order_id"], "ORDER-1");
        assert_eq!(json["transaction_details"]["gross_amount"], 90_000);
        assert_eq!(json["customer_details"]["first_name"], "Ana");
        assert_eq!(json["customer_details"]["phone"], "0811");
        assert_eq!(json["item_details"][0]["id"], "Muqarrar Termin 1");
        assert_eq!(json["item_details"][0]["price"], 90_000);
        assert_eq!(json["item_details"][0]["quantity"], 1);
    }

    #[test]
    fn transient_errors_are_retryable() {
        assert!(GatewayError::network("reset").retryable);
        assert!(GatewayError::timeout("15s").retryable);
        assert!(GatewayError::provider("502").retryable);
    }

    #[test]
    fn client_side_errors_are_not_retryable() {
        assert!(!GatewayError::authentication("bad key").retryable);
        assert!(!GatewayError::invalid_request("gross_amount").retryable);
        assert!(!GatewayError::not_configured().retryable);
    }

    #[test]
    fn gateway_error_display_includes_code() {
        let err = GatewayError::invalid_request("order_id has already been taken")
            .with_provider_code("406");
        assert_eq!(
            err.to_string(),
            "invalid_request: order_id has already been taken"
        );
        assert_eq!(err.provider_code.as_deref(), Some("406"));
    }

    #[test]
    fn token_without_redirect_omits_field() {
        let token = TransactionToken {
            token: "tok".into(),
            redirect_url: None,
        };
        let json = serde_json::to_value(&token).unwrap();
        assert!(json.get("redirect_url").is_none());
    }
}
