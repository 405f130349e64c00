//! Checkout error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | UnknownPackage | 400 |
//! | NonPayableOffering | 400 |
//! | CatalogConfiguration | 500 |
//! | Gateway (non-retryable) | 502 |
//! | Gateway (retryable) | 503 |
//! | OrderNotFound | 404 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised while issuing tokens or reading orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// A required request field is missing or blank.
    Validation { field: String },

    /// The package is not in the catalog.
    UnknownPackage(String),

    /// The package is free and has no paid checkout.
    NonPayableOffering(String),

    /// The catalog holds an amount that cannot be charged.
    CatalogConfiguration { package_id: String, amount: i64 },

    /// The payment gateway refused or failed to mint a token.
    Gateway { message: String, retryable: bool },

    /// No order with this id exists.
    OrderNotFound(String),

    /// Store or other infrastructure failure.
    Infrastructure(String),
}

impl CheckoutError {
    pub fn validation(field: impl Into<String>) -> Self {
        CheckoutError::Validation {
            field: field.into(),
        }
    }

    pub fn gateway(message: impl Into<String>, retryable: bool) -> Self {
        CheckoutError::Gateway {
            message: message.into(),
            retryable,
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CheckoutError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::Validation { .. } => ErrorCode::ValidationFailed,
            CheckoutError::UnknownPackage(_) => ErrorCode::UnknownPackage,
            CheckoutError::NonPayableOffering(_) => ErrorCode::NonPayableOffering,
            CheckoutError::CatalogConfiguration { .. } => ErrorCode::CatalogMisconfigured,
            CheckoutError::Gateway { .. } => ErrorCode::GatewayError,
            CheckoutError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            CheckoutError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a short message safe to show the customer.
    pub fn message(&self) -> String {
        match self {
            CheckoutError::Validation { field } => format!("Missing or invalid field: {}", field),
            CheckoutError::UnknownPackage(id) => format!("Unknown package: {}", id),
            CheckoutError::NonPayableOffering(id) => {
                format!("Package '{}' is free and does not require payment", id)
            }
            CheckoutError::CatalogConfiguration { .. } => {
                "Package pricing is misconfigured".to_string()
            }
            CheckoutError::Gateway { message, .. } => {
                format!("Payment gateway error: {}", message)
            }
            CheckoutError::OrderNotFound(id) => format!("Order not found: {}", id),
            CheckoutError::Infrastructure(_) => "Internal server error".to_string(),
        }
    }

    /// True when resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::Gateway { retryable, .. } => *retryable,
            CheckoutError::Infrastructure(_) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::CatalogConfiguration { package_id, amount } => write!(
                f,
                "Catalog amount {} for package '{}' is not chargeable",
                amount, package_id
            ),
            CheckoutError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for CheckoutError {}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::validation(err.field())
    }
}

impl From<DomainError> for CheckoutError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::OrderNotFound => CheckoutError::OrderNotFound(
                err.details
                    .get("order_id")
                    .cloned()
                    .unwrap_or_else(|| err.message.clone()),
            ),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                CheckoutError::Validation {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                }
            }
            _ => CheckoutError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================
    // Codes
    // ============================================================

    #[test]
    fn codes_map_per_variant() {
        assert_eq!(
            CheckoutError::validation("package_id").code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            CheckoutError::UnknownPackage("X".into()).code(),
            ErrorCode::UnknownPackage
        );
        assert_eq!(
            CheckoutError::NonPayableOffering("Free Trial".into()).code(),
            ErrorCode::NonPayableOffering
        );
        assert_eq!(
            CheckoutError::gateway("timeout", true).code(),
            ErrorCode::GatewayError
        );
    }

    // ============================================================
    // Messages
    // ============================================================

    #[test]
    fn infrastructure_message_hides_detail() {
        let err = CheckoutError::infrastructure("connection pool exhausted");
        assert_eq!(err.message(), "Internal server error");
        assert!(err.to_string().contains("connection pool exhausted"));
    }

    #[test]
    fn catalog_configuration_display_carries_detail() {
        let err = CheckoutError::CatalogConfiguration {
            package_id: "Broken".into(),
            amount: -5,
        };
        assert_eq!(err.message(), "Package pricing is misconfigured");
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn validation_message_names_field() {
        let err = CheckoutError::validation("customer_name");
        assert_eq!(err.message(), "Missing or invalid field: customer_name");
    }

    // ============================================================
    // Retryability
    // ============================================================

    #[test]
    fn gateway_retryability_follows_flag() {
        assert!(CheckoutError::gateway("timeout", true).is_retryable());
        assert!(!CheckoutError::gateway("bad request", false).is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        assert!(!CheckoutError::UnknownPackage("X".into()).is_retryable());
        assert!(!CheckoutError::validation("x").is_retryable());
    }

    // ============================================================
    // Conversions
    // ============================================================

    #[test]
    fn validation_error_converts_with_field() {
        let err: CheckoutError = ValidationError::empty_field("customer_contact").into();
        assert_eq!(err, CheckoutError::validation("customer_contact"));
    }

    #[test]
    fn order_not_found_domain_error_keeps_id() {
        let domain = DomainError::new(ErrorCode::OrderNotFound, "Order not found")
            .with_detail("order_id", "ORDER-9");
        let err: CheckoutError = domain.into();
        assert_eq!(err, CheckoutError::OrderNotFound("ORDER-9".to_string()));
    }

    #[test]
    fn database_error_becomes_infrastructure() {
        let err: CheckoutError = DomainError::new(ErrorCode::DatabaseError, "down").into();
        assert!(matches!(err, CheckoutError::Infrastructure(_)));
    }
}
