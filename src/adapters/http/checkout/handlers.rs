//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

use crate::application::handlers::checkout::{
    GetOrderHandler, GetOrderQuery, HandleNotificationCommand, HandleNotificationHandler,
    RequestTokenCommand, RequestTokenHandler,
};
use crate::domain::catalog::PriceCatalog;
use crate::domain::order::{CheckoutError, SignatureVerifier, WebhookError};
use crate::ports::{OrderIdGenerator, OrderStore, PaymentGateway};

use super::dto::{
    ErrorResponse, HealthResponse, OrderResponse, PackageResponse, PackagesResponse, TokenRequest,
    TokenResponse, WebhookAck,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub catalog: Arc<PriceCatalog>,
    pub order_store: Arc<dyn OrderStore>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub id_generator: Arc<dyn OrderIdGenerator>,
    pub verifier: Arc<SignatureVerifier>,
    pub is_production: bool,
}

impl CheckoutAppState {
    pub fn request_token_handler(&self) -> RequestTokenHandler {
        RequestTokenHandler::new(
            self.catalog.clone(),
            self.order_store.clone(),
            self.gateway.clone(),
            self.id_generator.clone(),
        )
    }

    pub fn notification_handler(&self) -> HandleNotificationHandler {
        HandleNotificationHandler::new(self.order_store.clone(), self.verifier.clone())
    }

    pub fn get_order_handler(&self) -> GetOrderHandler {
        GetOrderHandler::new(self.order_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness check
pub async fn health(State(state): State<CheckoutAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        production: state.is_production,
    })
}

/// GET /api/packages - List catalog packages and prices
pub async fn list_packages(State(state): State<CheckoutAppState>) -> impl IntoResponse {
    let packages = state
        .catalog
        .packages()
        .iter()
        .map(PackageResponse::from)
        .collect();
    Json(PackagesResponse { packages })
}

/// GET /api/order/:order_id - Current order state
pub async fn get_order(
    State(state): State<CheckoutAppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let order = state
        .get_order_handler()
        .handle(GetOrderQuery { order_id })
        .await?;

    Ok(Json(OrderResponse::from(order)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/token - Issue a payment token for a package
///
/// A body that is not a JSON object is treated as having no fields; a field
/// of the wrong type is treated as missing and named in the 400.
pub async fn request_token(
    State(state): State<CheckoutAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let request = TokenRequest::from_json(&payload);
    let cmd = RequestTokenCommand {
        customer_name: request.customer_name.unwrap_or_default(),
        customer_contact: request.customer_contact.unwrap_or_default(),
        package_id: request.package_id.unwrap_or_default(),
    };

    let result = state.request_token_handler().handle(cmd).await?;

    Ok(Json(TokenResponse {
        token: result.token,
        order_id: result.order_id.to_string(),
        redirect_url: result.redirect_url,
    }))
}

/// POST /api/webhook - Gateway payment notification
///
/// A body that is not valid JSON is rejected as malformed.
pub async fn handle_webhook(
    State(state): State<CheckoutAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    state
        .notification_handler()
        .handle(HandleNotificationCommand { payload })
        .await?;

    Ok(Json(WebhookAck::received()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
#[derive(Debug)]
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl CheckoutApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            CheckoutError::Validation { .. }
            | CheckoutError::UnknownPackage(_)
            | CheckoutError::NonPayableOffering(_) => StatusCode::BAD_REQUEST,
            CheckoutError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            CheckoutError::Gateway { .. } if self.0.is_retryable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            CheckoutError::Gateway { .. } => StatusCode::BAD_GATEWAY,
            CheckoutError::CatalogConfiguration { .. } | CheckoutError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Checkout request failed");
        }

        let code = self.0.code().to_string();
        let message = self.0.message();
        let body = match &self.0 {
            CheckoutError::Gateway { .. } => ErrorResponse::with_details(
                code,
                message,
                serde_json::json!({ "retryable": self.0.is_retryable() }),
            ),
            CheckoutError::Validation { field } => {
                ErrorResponse::with_details(code, message, serde_json::json!({ "field": field }))
            }
            _ => ErrorResponse::new(code, message),
        };
        (status, Json(body)).into_response()
    }
}

/// API error type for the webhook endpoint.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self.0,
                redelivery_expected = self.0.is_retryable(),
                "Notification processing failed"
            );
        }
        let body = ErrorResponse::new(self.0.code(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CheckoutError) -> StatusCode {
        CheckoutApiError::from(err).into_response().status()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Checkout Error Mapping
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(status_of(CheckoutError::validation("package_id")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(CheckoutError::UnknownPackage("X".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CheckoutError::NonPayableOffering("Free Trial".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn order_not_found_maps_to_404() {
        assert_eq!(
            status_of(CheckoutError::OrderNotFound("ORDER-x".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn gateway_errors_map_by_retryability() {
        assert_eq!(
            status_of(CheckoutError::gateway("timeout", true)),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(CheckoutError::gateway("rejected", false)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn gateway_error_body_reports_retryability() {
        for (retryable, expected) in [(true, true), (false, false)] {
            let response =
                CheckoutApiError::from(CheckoutError::gateway("upstream", retryable)).into_response();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["details"]["retryable"], expected);
        }
    }

    #[test]
    fn server_side_errors_map_to_500() {
        assert_eq!(
            status_of(CheckoutError::CatalogConfiguration {
                package_id: "X".into(),
                amount: -1
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(CheckoutError::infrastructure("down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Error Mapping
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn webhook_errors_use_their_status_codes() {
        let response = WebhookApiError::from(WebhookError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response =
            WebhookApiError::from(WebhookError::MalformedPayload("order_id")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
