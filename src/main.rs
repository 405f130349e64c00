//! Snap Checkout server binary.

use std::sync::Arc;

use http::{header, HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use snap_checkout::adapters::http::checkout::{checkout_router, CheckoutAppState};
use snap_checkout::adapters::{
    InMemoryOrderStore, SnapConfig, SnapGatewayAdapter, TimestampOrderIdGenerator,
    UuidOrderIdGenerator,
};
use snap_checkout::config::{AppConfig, LogFormat, OrderIdStrategy, ServerConfig};
use snap_checkout::domain::catalog::PriceCatalog;
use snap_checkout::domain::order::SignatureVerifier;
use snap_checkout::ports::OrderIdGenerator;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let missing = config.payment.missing_keys();
    if !missing.is_empty() {
        tracing::warn!(
            missing = ?missing,
            "Payment gateway keys not configured; token requests and webhooks will fail"
        );
    }

    let state = build_state(&config);
    let cors = cors_layer(&config.server);

    let app = checkout_router()
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        production = config.is_production(),
        "Snap checkout listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.server.log_format == LogFormat::Json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_state(config: &AppConfig) -> CheckoutAppState {
    let payment = &config.payment;

    let mut snap = SnapConfig::new(payment.server_key.clone(), payment.is_production)
        .with_timeout(payment.gateway_timeout());
    if let Some(url) = &payment.api_base_url {
        snap = snap.with_base_url(url.clone());
    }
    tracing::debug!(base_url = snap.api_base_url(), "Snap gateway configured");

    let id_generator: Arc<dyn OrderIdGenerator> = match payment.order_id_strategy {
        OrderIdStrategy::Timestamp => Arc::new(TimestampOrderIdGenerator::new()),
        OrderIdStrategy::Uuid => Arc::new(UuidOrderIdGenerator::new()),
    };

    CheckoutAppState {
        catalog: Arc::new(PriceCatalog::default()),
        order_store: Arc::new(InMemoryOrderStore::new()),
        gateway: Arc::new(SnapGatewayAdapter::new(snap)),
        id_generator,
        verifier: Arc::new(SignatureVerifier::new(payment.server_key.clone())),
        is_production: payment.is_production,
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
