//! # checkout-core
//!
//! Core types and traits for the checkout facade.
//!
//! This crate provides:
//! - `CheckoutRequest` / `CheckoutSession` for session creation
//! - `Product` and `Price` for listings, plus the demo catalog
//! - `WebhookEvent` and the `WebhookHandler` trait
//! - `PaymentProvider` and `RandomSource` seams
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutRequest, ProductCatalog};
//!
//! let request = CheckoutRequest::new(
//!     "price_tutorial_ebook",
//!     "https://shop.example.com/success",
//!     "https://shop.example.com/cancel",
//! );
//! request.validate()?;
//!
//! let demo = ProductCatalog::demo();
//! assert_eq!(demo.len(), 3);
//! ```

pub mod checkout;
pub mod error;
pub mod event;
pub mod product;
pub mod strategy;

// Re-exports for convenience
pub use checkout::{CheckoutRequest, CheckoutSession, Mode};
pub use error::{PaymentError, PaymentResult};
pub use event::{
    dispatch_webhook_event, CheckoutCompletedData, LoggingWebhookHandler, WebhookEvent,
    WebhookEventData, WebhookHandler, CHECKOUT_SESSION_COMPLETED,
};
pub use product::{minor_to_major, Price, Product, ProductCatalog, DEMO_EBOOK_PRICE_ID};
pub use strategy::{
    BoxedPaymentProvider, FixedRandom, PaymentProvider, RandomSource, SeededRandom, ThreadRandom,
};
