//! Error types for gateway notification handling.
//!
//! Each variant maps to the HTTP status the gateway sees, which in turn
//! drives its redelivery behaviour.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that reject a notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// A signed field is absent or empty.
    #[error("Missing field: {0}")]
    MalformedPayload(&'static str),

    /// Signature did not match the server key.
    #[error("Invalid signature")]
    Unauthorized,

    /// Server key is not configured, so no notification can be verified.
    #[error("Webhook misconfigured: {0}")]
    Misconfigured(String),

    /// Order store failed while applying the notification.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebhookError {
    /// Returns true if the gateway should redeliver this notification.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WebhookError::Storage(_) | WebhookError::Misconfigured(_)
        )
    }

    /// Maps the error to the HTTP status returned to the gateway.
    ///
    /// - 4xx: rejected, state untouched
    /// - 5xx: server side problem, gateway will retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebhookError::Misconfigured(_) | WebhookError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short machine-readable code for error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            WebhookError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            WebhookError::Unauthorized => "INVALID_SIGNATURE",
            WebhookError::Misconfigured(_) => "WEBHOOK_MISCONFIGURED",
            WebhookError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                WebhookError::Storage(err.message)
            }
            _ => WebhookError::Storage(format!("{}: {}", err.code, err.message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Display
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn malformed_payload_names_field() {
        let err = WebhookError::MalformedPayload("gross_amount");
        assert_eq!(err.to_string(), "Missing field: gross_amount");
    }

    #[test]
    fn unauthorized_displays_correctly() {
        assert_eq!(WebhookError::Unauthorized.to_string(), "Invalid signature");
    }

    // ══════════════════════════════════════════════════════════════
    // Status Codes
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn malformed_payload_returns_bad_request() {
        let err = WebhookError::MalformedPayload("order_id");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_returns_401() {
        assert_eq!(
            WebhookError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn misconfigured_and_storage_return_500() {
        assert_eq!(
            WebhookError::Misconfigured("no key".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WebhookError::Storage("lock poisoned".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Retryability
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn client_side_rejections_are_not_retryable() {
        assert!(!WebhookError::Unauthorized.is_retryable());
        assert!(!WebhookError::MalformedPayload("order_id").is_retryable());
    }

    #[test]
    fn server_side_failures_are_retryable() {
        assert!(WebhookError::Storage("down".into()).is_retryable());
        assert!(WebhookError::Misconfigured("no key".into()).is_retryable());
    }

    #[test]
    fn domain_error_becomes_storage_error() {
        let err: WebhookError = DomainError::new(ErrorCode::DatabaseError, "write failed").into();
        assert_eq!(err, WebhookError::Storage("write failed".to_string()));
    }
}
