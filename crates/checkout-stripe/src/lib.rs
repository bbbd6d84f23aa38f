//! # checkout-stripe
//!
//! Stripe-backed payment facade.
//!
//! - **PaymentFacade** - create checkout sessions, handle webhooks, list products.
//!   Runs in mock mode until a real secret key is configured.
//! - **StripeClient** - live `PaymentProvider` over the Stripe REST API
//! - **WebhookVerifier** - `Stripe-Signature` authentication
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::{PaymentFacade, StripeConfig};
//! use checkout_core::CheckoutRequest;
//!
//! let facade = PaymentFacade::new(StripeConfig::from_env())?;
//!
//! let session = facade
//!     .create_checkout_session(&CheckoutRequest::new(
//!         "price_tutorial_basic_monthly",
//!         "https://example.com/success",
//!         "https://example.com/cancel",
//!     ))
//!     .await?;
//!
//! // Redirect user to session.url
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! // In your webhook endpoint:
//! let receipt = facade.handle_webhook(&body, signature)?;
//! assert!(receipt.success);
//! ```

pub mod client;
pub mod config;
pub mod facade;
pub mod mock;
pub mod webhook;

// Re-exports
pub use client::StripeClient;
pub use config::StripeConfig;
pub use facade::{PaymentFacade, WebhookReceipt};
pub use mock::{mock_session, MOCK_SESSION_PREFIX, MOCK_SUCCESS_RATE};
pub use webhook::{sign_payload, WebhookVerifier, SIGNATURE_HEADER};
