//! # Webhook Events
//!
//! Verified webhook events and the handler seam that reacts to them.
//! Handlers only observe; nothing here fulfils or persists orders.

use crate::error::PaymentResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Event type the facade reacts to
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// An authenticated webhook event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Provider event id (evt_...)
    #[serde(default)]
    pub id: String,

    /// Event type discriminator, e.g. "checkout.session.completed"
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp the provider created the event at
    #[serde(default)]
    pub created: i64,

    /// Event payload
    #[serde(default)]
    pub data: WebhookEventData,
}

/// Wrapper around the event's subject object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookEventData {
    #[serde(default)]
    pub object: serde_json::Map<String, serde_json::Value>,
}

impl WebhookEvent {
    pub fn is_checkout_completed(&self) -> bool {
        self.event_type == CHECKOUT_SESSION_COMPLETED
    }

    fn object_str(&self, key: &str) -> Option<String> {
        self.data
            .object
            .get(key)
            .and_then(|v| v.as_str())
            .map(String::from)
    }
}

/// Fields of a completed checkout session worth recording
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutCompletedData {
    pub session_id: Option<String>,
    /// Total in minor units, as reported by the provider
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
}

impl CheckoutCompletedData {
    pub fn from_event(event: &WebhookEvent) -> Self {
        Self {
            session_id: event.object_str("id"),
            amount_total: event
                .data
                .object
                .get("amount_total")
                .and_then(|v| v.as_i64()),
            currency: event.object_str("currency"),
        }
    }
}

/// Reacts to verified webhook events.
#[allow(unused_variables)]
pub trait WebhookHandler: Send + Sync {
    /// Called when a checkout session is completed
    fn on_checkout_completed(&self, data: CheckoutCompletedData) -> PaymentResult<()> {
        info!(
            session_id = ?data.session_id,
            amount_total = ?data.amount_total,
            currency = ?data.currency,
            "Payment for {} was successful",
            data.amount_total
                .map(|a| a.to_string())
                .unwrap_or_else(|| "unknown amount".to_string())
        );
        Ok(())
    }

    /// Called for every other event type
    fn on_other_event(&self, event: &WebhookEvent) -> PaymentResult<()> {
        debug!("Ignoring webhook event: type={}", event.event_type);
        Ok(())
    }
}

/// Default handler: logs completed checkouts, ignores everything else
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {}

/// Route an event to the matching handler method
pub fn dispatch_webhook_event(handler: &dyn WebhookHandler, event: &WebhookEvent) -> PaymentResult<()> {
    if event.is_checkout_completed() {
        handler.on_checkout_completed(CheckoutCompletedData::from_event(event))
    } else {
        handler.on_other_event(event)
    }
}
