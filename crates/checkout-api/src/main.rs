//! # Checkout Server
//!
//! Backend for the checkout frontend. Serves demo data until Stripe keys are set.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: live mode
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_WEBHOOK_SECRET=whsec_...
//!
//! # Run the server
//! checkout-server
//! ```

use checkout_api::{routes, state::AppState};
use checkout_core::Mode;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize application state (loads .env before logging reads LOG_FORMAT)
    let state = AppState::new()?;

    init_tracing(state.config.json_logs);

    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    match state.facade.mode() {
        Mode::Live => info!("Stripe mode: live"),
        Mode::Mock => warn!("Stripe mode: mock (no STRIPE_SECRET_KEY configured)"),
    }
    if state.facade.config().live_webhook_secret().is_none() {
        warn!("STRIPE_WEBHOOK_SECRET not configured; webhook calls will be rejected");
    }

    // Create router
    let is_prod = state.config.is_production();
    let app = routes::create_router(state);

    info!("Checkout server starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/healthz", addr);
        info!("Products: GET http://{}/api/payment/products", addr);
        info!("Checkout: POST http://{}/api/payment/create-checkout-session", addr);
        info!("Webhook: POST http://{}/api/payment/webhook", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}
