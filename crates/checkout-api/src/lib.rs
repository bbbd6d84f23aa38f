//! # checkout-api
//!
//! HTTP API layer for checkout-facade-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout session and product listing endpoints
//! - Stripe webhook endpoint
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/healthz` | Liveness probe |
//! | POST | `/api/payment/create-checkout-session` | Create checkout session |
//! | POST | `/api/payment/webhook` | Stripe webhook |
//! | GET | `/api/payment/products` | List products |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
