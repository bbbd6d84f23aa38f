//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::{AppConfig, AppState};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Create the main application router
///
/// Routes:
/// - GET  /healthz - Liveness probe
/// - POST /api/payment/create-checkout-session - Create checkout session
/// - POST /api/payment/webhook - Stripe webhook (raw body, signature header)
/// - GET  /api/payment/products - List products with prices
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let payment_routes = Router::new()
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session),
        )
        .route("/webhook", post(handlers::stripe_webhook))
        .route("/products", get(handlers::list_products));

    Router::new()
        .route("/healthz", get(handlers::health))
        .nest("/api/payment", payment_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
