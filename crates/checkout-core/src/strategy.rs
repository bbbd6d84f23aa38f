//! # Provider and Randomness Seams
//!
//! `PaymentProvider` is the boundary to a remote payment API; the facade only
//! calls it in live mode. `RandomSource` drives the mock-mode redirect so tests
//! can pin the outcome with a seed.
//!
//! ```text
//! ┌────────────────┐   live   ┌──────────────────────────┐
//! │ PaymentFacade  │ ───────▶ │ PaymentProvider (trait)  │
//! │                │          │  ├── create_session()    │
//! │                │          │  └── list_products()     │
//! │                │   mock   └──────────────────────────┘
//! │                │ ───────▶ demo catalog + RandomSource
//! └────────────────┘
//! ```

use crate::checkout::{CheckoutRequest, CheckoutSession};
use crate::error::PaymentResult;
use crate::product::Product;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Remote payment provider used in live mode.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session for one unit of `request.price_id`.
    async fn create_session(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutSession>;

    /// List active products with their active prices, in provider order.
    ///
    /// Products may come back with an empty price list; the caller filters.
    async fn list_products(&self) -> PaymentResult<Vec<Product>>;

    /// Provider name (for logging and error tagging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

/// Production source backed by the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Deterministic source for tests and reproducible demos
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.random::<f64>(),
            Err(poisoned) => poisoned.into_inner().random::<f64>(),
        }
    }
}

/// Always returns the same value; handy for forcing a branch
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_f64(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);

        for _ in 0..16 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_samples_in_unit_interval() {
        let seeded = SeededRandom::new(7);
        for _ in 0..1000 {
            let x = seeded.next_f64();
            assert!((0.0..1.0).contains(&x));
            let y = ThreadRandom.next_f64();
            assert!((0.0..1.0).contains(&y));
        }
    }
}
