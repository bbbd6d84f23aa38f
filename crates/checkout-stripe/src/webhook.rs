//! # Stripe Webhook Verification
//!
//! Authenticates inbound webhook calls using Stripe's signing scheme:
//! the `Stripe-Signature` header carries `t=<unix>` and one or more
//! `v1=<hex>` entries, where each `v1` is HMAC-SHA256 over `"{t}.{body}"`
//! keyed with the endpoint's signing secret.

use crate::config::DEFAULT_WEBHOOK_TOLERANCE_SECS;
use checkout_core::{PaymentError, PaymentResult, WebhookEvent};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Name of the header Stripe signs webhook calls with
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Verifies webhook signatures and parses the event body
#[derive(Debug, Clone, Copy)]
pub struct WebhookVerifier {
    tolerance_secs: i64,
}

impl WebhookVerifier {
    pub fn new(tolerance_secs: i64) -> Self {
        Self { tolerance_secs }
    }

    /// Verify against the current time
    pub fn verify(&self, payload: &[u8], signature: &str, secret: &str) -> PaymentResult<WebhookEvent> {
        self.verify_at(payload, signature, secret, Utc::now().timestamp())
    }

    /// Verify as if the current time were `now` (unix seconds)
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature: &str,
        secret: &str,
        now: i64,
    ) -> PaymentResult<WebhookEvent> {
        let header = parse_signature_header(signature)?;

        let skew = now.checked_sub(header.timestamp).map(i64::unsigned_abs);
        if !matches!(skew, Some(secs) if secs <= self.tolerance_secs.unsigned_abs()) {
            return Err(PaymentError::InvalidSignature(
                "Timestamp outside the tolerance zone".to_string(),
            ));
        }

        let valid = header
            .signatures
            .iter()
            .any(|sig| signature_matches(secret, header.timestamp, payload, sig));

        if !valid {
            return Err(PaymentError::InvalidSignature(
                "No signatures found matching the expected signature for payload".to_string(),
            ));
        }

        let event: WebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::RequestError(format!("Invalid webhook payload: {}", e)))?;

        debug!("Verified Stripe webhook: id={}, type={}", event.id, event.event_type);

        Ok(event)
    }
}

impl Default for WebhookVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_WEBHOOK_TOLERANCE_SECS)
    }
}

/// Build a `Stripe-Signature` header value for `payload`.
///
/// Used by tests and local tooling to produce calls the verifier accepts.
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mac = signed_mac(secret, timestamp, payload);
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> PaymentResult<SignatureHeader> {
    if header.trim().is_empty() {
        return Err(PaymentError::InvalidSignature(
            "Missing Stripe-Signature header".to_string(),
        ));
    }

    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                timestamp = Some(value.parse::<i64>().map_err(|_| {
                    PaymentError::InvalidSignature(format!("Malformed timestamp: {}", value))
                })?);
            }
            "v1" => signatures.push(value.to_string()),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        PaymentError::InvalidSignature("Missing timestamp in signature header".to_string())
    })?;

    if signatures.is_empty() {
        return Err(PaymentError::InvalidSignature(
            "No v1 signature found".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn signed_mac(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

fn signature_matches(secret: &str, timestamp: i64, payload: &[u8], candidate: &str) -> bool {
    let Ok(bytes) = hex::decode(candidate) else {
        return false;
    };
    signed_mac(secret, timestamp, payload)
        .verify_slice(&bytes)
        .is_ok()
}
