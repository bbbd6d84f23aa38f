//! # Mock Mode
//!
//! Synthetic responses served when no Stripe secret key is configured, so the
//! frontend can be developed end to end without an account.

use checkout_core::{CheckoutRequest, CheckoutSession, RandomSource, DEMO_EBOOK_PRICE_ID};

/// Prefix of synthesized session ids
pub const MOCK_SESSION_PREFIX: &str = "cs_test_mock_";

/// Share of mock checkouts (other than the e-book) that "succeed"
pub const MOCK_SUCCESS_RATE: f64 = 0.7;

/// Synthesize a session for `request`.
///
/// The e-book always succeeds; every other price lands on the success URL
/// with probability `MOCK_SUCCESS_RATE`, otherwise on the cancel URL.
pub fn mock_session(request: &CheckoutRequest, random: &dyn RandomSource) -> CheckoutSession {
    let succeeds =
        request.price_id == DEMO_EBOOK_PRICE_ID || random.next_f64() < MOCK_SUCCESS_RATE;

    let url = if succeeds {
        request.success_url.clone()
    } else {
        request.cancel_url.clone()
    };

    CheckoutSession {
        id: format!("{}{}", MOCK_SESSION_PREFIX, request.price_id),
        url,
    }
}
