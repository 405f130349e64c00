//! Axum router configuration for checkout endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_order, handle_webhook, health, list_packages, request_token, CheckoutAppState,
};

/// Create the checkout API routes, mounted under `/api`.
///
/// # Routes
/// - `GET /packages` - Catalog packages and prices
/// - `POST /token` - Issue a payment token
/// - `POST /webhook` - Gateway notifications (signature verified)
/// - `GET /order/:order_id` - Order status
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/packages", get(list_packages))
        .route("/token", post(request_token))
        .route("/webhook", post(handle_webhook))
        .route("/order/:order_id", get(get_order))
}

/// Create the complete checkout router.
///
/// # Example
///
/// ```ignore
/// let app = checkout_router().with_state(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", checkout_routes())
}
