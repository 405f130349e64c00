//! Mock payment gateway for testing.
//!
//! Supports:
//! - Deterministic tokens derived from the order id
//! - Error injection (next call or every call)
//! - Call tracking

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{GatewayError, PaymentGateway, TransactionRequest, TransactionToken};

/// Mock gateway for tests.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// gateway.fail_next(GatewayError::timeout("simulated"));
///
/// let result = gateway.create_transaction_token(request).await;
/// assert!(result.is_err());
/// assert_eq!(gateway.requests().len(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_error: Option<GatewayError>,
    always_error: Option<GatewayError>,
    requests: Vec<TransactionRequest>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every request with `error`.
    pub fn failing(error: GatewayError) -> Self {
        let mock = Self::new();
        mock.state().always_error = Some(error);
        mock
    }

    /// Fail only the next call.
    pub fn fail_next(&self, error: GatewayError) {
        self.state().next_error = Some(error);
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<TransactionRequest> {
        self.state().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Token the mock issues for `order_id`.
    pub fn token_for(order_id: &str) -> String {
        format!("mock-token-{}", order_id)
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panic inside a test while holding the lock should not hide later assertions.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_transaction_token(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionToken, GatewayError> {
        let mut state = self.state();
        state.requests.push(request.clone());

        if let Some(err) = state.next_error.take() {
            return Err(err);
        }
        if let Some(err) = &state.always_error {
            return Err(err.clone());
        }

        let token = Self::token_for(request.order_id());
        Ok(TransactionToken {
            redirect_url: Some(format!("https://pay.example.test/{}", token)),
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(order_id: &str) -> TransactionRequest {
        TransactionRequest::single_item(order_id, 90_000, "Ana", "0811", "Muqarrar Termin 1")
    }

    #[tokio::test]
    async fn issues_token_derived_from_order_id() {
        let gateway = MockPaymentGateway::new();
        let token = gateway
            .create_transaction_token(request("ORDER-1"))
            .await
            .unwrap();
        assert_eq!(token.token, "mock-token-ORDER-1");
    }

    #[tokio::test]
    async fn fail_next_applies_once() {
        let gateway = MockPaymentGateway::new();
        gateway.fail_next(GatewayError::timeout("simulated"));

        assert!(gateway.create_transaction_token(request("A")).await.is_err());
        assert!(gateway.create_transaction_token(request("B")).await.is_ok());
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_gateway_rejects_every_call() {
        let gateway = MockPaymentGateway::failing(GatewayError::provider("down"));
        assert!(gateway.create_transaction_token(request("A")).await.is_err());
        assert!(gateway.create_transaction_token(request("B")).await.is_err());
    }

    #[tokio::test]
    async fn records_requests() {
        let gateway = MockPaymentGateway::new();
        gateway
            .create_transaction_token(request("ORDER-7"))
            .await
            .unwrap();
        assert_eq!(gateway.requests()[0].order_id(), "ORDER-7");
    }
}
