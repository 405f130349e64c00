//! Midtrans Snap payment gateway adapter.
//!
//! Implements `PaymentGateway` against the Snap transactions API:
//! `POST {base}/snap/v1/transactions` with HTTP Basic auth, where the
//! server key is the username and the password is empty.
//!
//! # Configuration
//!
//! ```ignore
//! let config = SnapConfig::new(server_key, false).with_timeout(Duration::from_secs(15));
//! let adapter = SnapGatewayAdapter::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::order::server_key_configured;
use crate::ports::{GatewayError, PaymentGateway, TransactionRequest, TransactionToken};

const SANDBOX_BASE_URL: &str = "https://app.sandbox.midtrans.com";
const PRODUCTION_BASE_URL: &str = "https://app.midtrans.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Snap API configuration.
#[derive(Clone)]
pub struct SnapConfig {
    server_key: SecretString,
    api_base_url: String,
    timeout: Duration,
}

impl SnapConfig {
    /// Targets production or sandbox depending on `is_production`.
    pub fn new(server_key: SecretString, is_production: bool) -> Self {
        let api_base_url = if is_production {
            PRODUCTION_BASE_URL
        } else {
            SANDBOX_BASE_URL
        };
        Self {
            server_key,
            api_base_url: api_base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Upper bound on one token request, connect included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn transactions_url(&self) -> String {
        format!("{}/snap/v1/transactions", self.api_base_url)
    }
}

impl std::fmt::Debug for SnapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapConfig")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Snap error body, e.g. `{"error_messages": ["transaction_details.gross_amount is required"]}`.
#[derive(Debug, Deserialize)]
struct SnapErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
}

/// Snap success body.
#[derive(Debug, Deserialize)]
struct SnapTokenBody {
    token: String,
    #[serde(default)]
    redirect_url: Option<String>,
}

/// Payment gateway backed by Midtrans Snap.
pub struct SnapGatewayAdapter {
    config: SnapConfig,
    http_client: reqwest::Client,
}

impl SnapGatewayAdapter {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn map_transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::timeout(format!(
                "Snap did not respond within {}s",
                self.config.timeout.as_secs()
            ))
        } else {
            GatewayError::network(err.to_string())
        }
    }
}

/// Maps a non-success Snap response to a typed error.
fn map_error_response(status: StatusCode, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<SnapErrorBody>(body)
        .ok()
        .filter(|b| !b.error_messages.is_empty())
        .map(|b| b.error_messages.join("; "))
        .unwrap_or_else(|| body.trim().to_string());
    let message = if detail.is_empty() {
        format!("Snap API returned {}", status)
    } else {
        detail
    };

    let err = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::authentication(message),
        s if s.is_client_error() => GatewayError::invalid_request(message),
        _ => GatewayError::provider(message),
    };
    err.with_provider_code(status.as_u16().to_string())
}

#[async_trait]
impl PaymentGateway for SnapGatewayAdapter {
    async fn create_transaction_token(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionToken, GatewayError> {
        if !server_key_configured(&self.config.server_key) {
            return Err(GatewayError::not_configured());
        }

        let response = self
            .http_client
            .post(self.config.transactions_url())
            .basic_auth(self.config.server_key.expose_secret(), Some(""))
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = map_error_response(status, &body);
            tracing::warn!(
                order_id = %request.order_id(),
                status = status.as_u16(),
                error = %err,
                "Snap token request rejected"
            );
            return Err(err);
        }

        let body: SnapTokenBody = response.json().await.map_err(|e| {
            GatewayError::provider(format!("Failed to parse Snap response: {}", e))
        })?;

        Ok(TransactionToken {
            token: body.token,
            redirect_url: body.redirect_url,
        })
    }
}
