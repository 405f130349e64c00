//! RequestTokenHandler - Command handler for issuing payment tokens.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, PriceCatalog};
use crate::domain::foundation::OrderId;
use crate::domain::order::{CheckoutError, Order};
use crate::ports::{
    GatewayErrorCode, OrderIdGenerator, OrderStore, PaymentGateway, TransactionRequest,
};

/// Command to issue a payment token for one package.
///
/// There is no amount field: the price always comes from the catalog.
#[derive(Debug, Clone)]
pub struct RequestTokenCommand {
    pub customer_name: String,
    pub customer_contact: String,
    pub package_id: String,
}

/// Result of successful token issuance.
#[derive(Debug, Clone)]
pub struct RequestTokenResult {
    pub token: String,
    pub order_id: OrderId,
    pub redirect_url: Option<String>,
    pub order: Order,
}

/// Handler that prices, registers and tokenizes a checkout.
///
/// The order is persisted only after the gateway returns a token, so a
/// failed or timed-out gateway call leaves no order behind.
pub struct RequestTokenHandler {
    catalog: Arc<PriceCatalog>,
    order_store: Arc<dyn OrderStore>,
    gateway: Arc<dyn PaymentGateway>,
    id_generator: Arc<dyn OrderIdGenerator>,
}

impl RequestTokenHandler {
    pub fn new(
        catalog: Arc<PriceCatalog>,
        order_store: Arc<dyn OrderStore>,
        gateway: Arc<dyn PaymentGateway>,
        id_generator: Arc<dyn OrderIdGenerator>,
    ) -> Self {
        Self {
            catalog,
            order_store,
            gateway,
            id_generator,
        }
    }

    pub async fn handle(&self, cmd: RequestTokenCommand) -> Result<RequestTokenResult, CheckoutError> {
        // 1. Required fields
        let customer_name = required(&cmd.customer_name, "customer_name")?;
        let customer_contact = required(&cmd.customer_contact, "customer_contact")?;
        let package_id = required(&cmd.package_id, "package_id")?;

        // 2. Authoritative price
        let amount = self.catalog.lookup(package_id).map_err(|e| match e {
            CatalogError::NotFound(id) | CatalogError::DuplicatePackage(id) => {
                CheckoutError::UnknownPackage(id)
            }
        })?;

        // 3. Free packages have no paid checkout
        if amount == 0 {
            return Err(CheckoutError::NonPayableOffering(package_id.to_string()));
        }
        if amount < 0 {
            tracing::error!(
                package_id = %package_id,
                amount = amount,
                "Catalog holds a non-chargeable amount"
            );
            return Err(CheckoutError::CatalogConfiguration {
                package_id: package_id.to_string(),
                amount,
            });
        }

        // 4. Fresh order id, order validated before any external call
        let order_id = self.id_generator.next_id();
        let order = Order::create(
            order_id.clone(),
            customer_name,
            customer_contact,
            package_id,
            amount,
        )?;

        // 5. Gateway token
        let request = TransactionRequest::single_item(
            order_id.as_str(),
            amount,
            customer_name,
            customer_contact,
            package_id,
        );
        let token = self
            .gateway
            .create_transaction_token(request)
            .await
            .map_err(|e| {
                tracing::warn!(
                    order_id = %order_id,
                    code = %e.code,
                    provider_code = ?e.provider_code,
                    retryable = e.retryable,
                    error = %e.message,
                    "Gateway token request failed"
                );
                match e.code {
                    GatewayErrorCode::NotConfigured => CheckoutError::infrastructure(e.message),
                    _ => CheckoutError::gateway(e.message, e.retryable),
                }
            })?;

        // 6. Persist
        self.order_store.create(&order).await?;

        tracing::info!(
            order_id = %order_id,
            package_id = %package_id,
            amount = amount,
            "Payment token issued"
        );

        Ok(RequestTokenResult {
            token: token.token,
            order_id,
            redirect_url: token.redirect_url,
            order,
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CheckoutError::validation(field))
    } else {
        Ok(trimmed)
    }
}
