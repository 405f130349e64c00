//! HandleNotificationHandler - Command handler for gateway payment notifications.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::{OrderId, StateMachine, Timestamp};
use crate::domain::order::{
    parse_whole_amount, Order, OrderStatus, PaymentNotification, SignatureVerifier, WebhookError,
};
use crate::ports::OrderStore;

/// Command carrying a raw notification body.
#[derive(Debug, Clone)]
pub struct HandleNotificationCommand {
    pub payload: Value,
}

/// Result of an accepted notification.
#[derive(Debug, Clone)]
pub struct HandleNotificationResult {
    pub order_id: OrderId,
    /// Status before this notification; `Unknown` for a fresh placeholder.
    pub previous_status: OrderStatus,
    pub status: OrderStatus,
    /// True when the order was absent and a placeholder was recorded.
    pub placeholder_created: bool,
}

/// Handler that verifies and applies gateway notifications.
///
/// Nothing is read from or written to the store until the signature has
/// been verified. Accepted notifications overwrite the order status
/// unconditionally (last write wins); moves the status lattice considers
/// incompatible, such as `PAID` to `EXPIRED`, are applied and logged.
pub struct HandleNotificationHandler {
    order_store: Arc<dyn OrderStore>,
    verifier: Arc<SignatureVerifier>,
}

impl HandleNotificationHandler {
    pub fn new(order_store: Arc<dyn OrderStore>, verifier: Arc<SignatureVerifier>) -> Self {
        Self {
            order_store,
            verifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleNotificationCommand,
    ) -> Result<HandleNotificationResult, WebhookError> {
        let notification = PaymentNotification::from_json(cmd.payload);

        // 1. Signed fields present
        let fields = notification.signed_fields()?;

        // 2. Signature, before any state is touched
        if !self.verifier.is_configured() {
            tracing::error!("Notification received but gateway server key is not configured");
            return Err(WebhookError::Misconfigured(
                "gateway server key is not configured".to_string(),
            ));
        }
        if !self.verifier.verify(
            fields.order_id,
            fields.status_code,
            fields.gross_amount,
            fields.signature_key,
        ) {
            tracing::warn!(
                order_id = %fields.order_id,
                status_code = %fields.status_code,
                "Notification signature mismatch"
            );
            return Err(WebhookError::Unauthorized);
        }

        let order_id =
            OrderId::new(fields.order_id).map_err(|_| WebhookError::MalformedPayload("order_id"))?;

        // 3. Target status
        let status = OrderStatus::from_gateway(
            notification.transaction_status.as_deref(),
            notification.fraud_status.as_deref(),
        );

        // 4. Apply atomically, seeding a placeholder if the order is unknown
        let seed = Order::placeholder(
            order_id.clone(),
            parse_whole_amount(fields.gross_amount).unwrap_or(0),
        );
        let raw = notification.raw.clone();
        let now = Timestamp::now();
        let mut observed: Option<(OrderStatus, bool)> = None;
        let observed_ref = &mut observed;

        self.order_store
            .upsert(
                &order_id,
                seed,
                Box::new(move |order: &mut Order| {
                    let is_placeholder =
                        order.raw_notification().is_none() && order.package_id().is_empty();
                    *observed_ref = Some((order.status(), is_placeholder));
                    order.apply_notification(status, raw, now);
                }),
            )
            .await?;

        let (previous_status, placeholder_created) =
            observed.unwrap_or((OrderStatus::Unknown, false));

        if placeholder_created {
            tracing::warn!(
                order_id = %order_id,
                status = %status,
                "Notification for unknown order, recorded placeholder"
            );
        } else if !previous_status.can_transition_to(&status) {
            tracing::warn!(
                order_id = %order_id,
                from = %previous_status,
                to = %status,
                from_terminal = previous_status.is_terminal(),
                "Applying out-of-order status change"
            );
        }

        if status == OrderStatus::Unknown {
            tracing::info!(
                order_id = %order_id,
                transaction_status = ?notification.transaction_status,
                "Unrecognised transaction status"
            );
        }

        tracing::info!(
            order_id = %order_id,
            from = %previous_status,
            to = %status,
            "Payment notification applied"
        );

        Ok(HandleNotificationResult {
            order_id,
            previous_status,
            status,
            placeholder_created,
        })
    }
}
