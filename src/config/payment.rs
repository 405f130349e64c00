//! Payment configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::order::server_key_configured;

const SANDBOX_KEY_PREFIX: &str = "SB-";

/// Payment gateway configuration (Midtrans Snap)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Use the live gateway instead of the sandbox
    #[serde(default)]
    pub is_production: bool,

    /// Gateway server key; signs notifications and authenticates token requests
    #[serde(default = "empty_secret")]
    pub server_key: SecretString,

    /// Gateway client key, handed to the storefront's payment widget
    #[serde(default)]
    pub client_key: String,

    /// Override for the gateway API base URL
    pub api_base_url: Option<String>,

    /// Upper bound on one token request, in seconds
    #[serde(default = "default_gateway_timeout")]
    pub gateway_timeout_secs: u64,

    /// How order ids are minted
    #[serde(default)]
    pub order_id_strategy: OrderIdStrategy,
}

/// Order id generation strategy
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderIdStrategy {
    /// `ORDER-{unix_millis}-{random}`
    #[default]
    Timestamp,
    /// `ORDER-{uuid v4}`
    Uuid,
}

impl PaymentConfig {
    pub fn has_server_key(&self) -> bool {
        server_key_configured(&self.server_key)
    }

    pub fn has_client_key(&self) -> bool {
        !self.client_key.trim().is_empty()
    }

    /// Names of keys that are not configured, for the startup warning
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.has_server_key() {
            missing.push("server_key");
        }
        if !self.has_client_key() {
            missing.push("client_key");
        }
        missing
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }

    /// Validate payment configuration
    ///
    /// Missing keys are not an error: the service still starts and serves
    /// health and catalog requests.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.gateway_timeout_secs == 0 || self.gateway_timeout_secs > 120 {
            return Err(ValidationError::InvalidGatewayTimeout);
        }
        if let Some(url) = &self.api_base_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ValidationError::InvalidApiBaseUrl);
            }
        }
        if self.is_production && self.server_key.expose_secret().starts_with(SANDBOX_KEY_PREFIX) {
            return Err(ValidationError::SandboxKeyInProduction);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            is_production: false,
            server_key: empty_secret(),
            client_key: String::new(),
            api_base_url: None,
            gateway_timeout_secs: default_gateway_timeout(),
            order_id_strategy: OrderIdStrategy::default(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_gateway_timeout() -> u64 {
    15
}
