//! # Checkout Types
//!
//! Request/response shapes for checkout session creation.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Which path an operation takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No usable provider credential: responses are synthesized locally
    Mock,
    /// Calls go to the payment provider
    Live,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Mock => "mock",
            Mode::Live => "live",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound request to start a checkout for a single price
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Provider price id to charge
    #[serde(default)]
    pub price_id: String,
    /// Where the customer lands after paying
    #[serde(default)]
    pub success_url: String,
    /// Where the customer lands after abandoning checkout
    #[serde(default)]
    pub cancel_url: String,
}

impl CheckoutRequest {
    pub fn new(
        price_id: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            price_id: price_id.into(),
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }

    /// Reject blank fields and relative redirect URLs
    pub fn validate(&self) -> PaymentResult<()> {
        if self.price_id.trim().is_empty() {
            return Err(PaymentError::InvalidRequest(
                "price_id must not be empty".to_string(),
            ));
        }

        for (field, value) in [
            ("success_url", &self.success_url),
            ("cancel_url", &self.cancel_url),
        ] {
            if value.trim().is_empty() {
                return Err(PaymentError::InvalidRequest(format!(
                    "{} must not be empty",
                    field
                )));
            }
            if !is_absolute_http_url(value) {
                return Err(PaymentError::InvalidRequest(format!(
                    "{} must be an absolute http(s) URL: {}",
                    field, value
                )));
            }
        }

        Ok(())
    }
}

fn is_absolute_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Session handed back to the frontend for redirection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Session id (provider id, or synthetic in mock mode)
    pub id: String,
    /// URL to redirect the customer to
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(price_id: &str) -> CheckoutRequest {
        CheckoutRequest::new(
            price_id,
            "http://localhost:5173/success",
            "http://localhost:5173/cancel",
        )
    }

    #[test]
    fn test_valid_request() {
        assert!(request("price_tutorial_basic_monthly").validate().is_ok());
    }

    #[test]
    fn test_empty_price_id_rejected() {
        for price_id in ["", "   "] {
            let err = request(price_id).validate().unwrap_err();
            assert!(matches!(err, PaymentError::InvalidRequest(_)));
        }
    }

    #[test]
    fn test_empty_urls_rejected() {
        let mut req = request("price_a");
        req.success_url.clear();
        assert!(matches!(
            req.validate(),
            Err(PaymentError::InvalidRequest(msg)) if msg.contains("success_url")
        ));

        let mut req = request("price_a");
        req.cancel_url = " ".to_string();
        assert!(matches!(
            req.validate(),
            Err(PaymentError::InvalidRequest(msg)) if msg.contains("cancel_url")
        ));
    }

    #[test]
    fn test_relative_urls_rejected() {
        let mut req = request("price_a");
        req.success_url = "/success".to_string();
        assert!(req.validate().is_err());

        req.success_url = "ftp://shop.example.com/thanks".to_string();
        assert!(req.validate().is_err());

        req.success_url = "https://shop.example.com/thanks".to_string();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_malformed_hosts_rejected() {
        for url in [
            "https://exa mple.com/ok",
            "http://<script>",
            "https://?x",
            "https://",
            "mailto:shop@example.com",
        ] {
            let mut req = request("price_a");
            req.cancel_url = url.to_string();
            assert!(
                matches!(req.validate(), Err(PaymentError::InvalidRequest(msg)) if msg.contains("cancel_url")),
                "{:?} should be rejected",
                url
            );
        }
    }

    #[test]
    fn test_ports_and_queries_accepted() {
        let req = CheckoutRequest::new(
            "price_a",
            "http://127.0.0.1:5173/success?session_id={CHECKOUT_SESSION_ID}",
            "https://shop.example.com:8443/cancel#top",
        );
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let req: CheckoutRequest = serde_json::from_str(r#"{"price_id": "price_a"}"#).unwrap();
        assert!(req.success_url.is_empty());
        assert!(req.validate().is_err());
    }
}
