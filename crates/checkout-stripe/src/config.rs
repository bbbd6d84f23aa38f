//! # Stripe Configuration
//!
//! Configuration for the Stripe integration, loaded once from the environment.
//!
//! Missing secrets are not an error here. An absent or placeholder secret key
//! puts the facade in mock mode; an absent or placeholder webhook secret makes
//! webhook calls fail with `NotConfigured`.

use checkout_core::Mode;
use std::env;
use std::time::Duration;

/// Placeholder shipped in `.env.example` for the secret key
pub const DEFAULT_SECRET_KEY_PLACEHOLDER: &str = "your_stripe_secret_key";

/// Placeholder shipped in `.env.example` for the webhook signing secret
pub const DEFAULT_WEBHOOK_SECRET_PLACEHOLDER: &str = "your_stripe_webhook_secret";

pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
pub const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PRODUCT_PAGE_LIMIT: u32 = 10;

/// Stripe's documented signature tolerance
pub const DEFAULT_WEBHOOK_TOLERANCE_SECS: i64 = 300;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: Option<String>,

    /// Webhook signing secret (whsec_...)
    pub webhook_secret: Option<String>,

    /// Value of `secret_key` that counts as "not configured"
    pub secret_key_placeholder: String,

    /// Value of `webhook_secret` that counts as "not configured"
    pub webhook_secret_placeholder: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,

    /// Upper bound on a single provider call
    pub request_timeout: Duration,

    /// How many products one listing fetches
    pub product_page_limit: u32,

    /// Maximum age (either direction) of a webhook signature timestamp, in seconds
    pub webhook_tolerance_secs: i64,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized env vars:
    /// - `STRIPE_SECRET_KEY` (or `STRIPE_API_KEY`)
    /// - `STRIPE_WEBHOOK_SECRET`
    /// - `STRIPE_SECRET_KEY_PLACEHOLDER`, `STRIPE_WEBHOOK_SECRET_PLACEHOLDER`
    /// - `STRIPE_API_BASE_URL`, `STRIPE_TIMEOUT_SECS`, `STRIPE_PRODUCT_LIMIT`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::unconfigured();
        config.secret_key = non_empty("STRIPE_SECRET_KEY").or_else(|| non_empty("STRIPE_API_KEY"));
        config.webhook_secret = non_empty("STRIPE_WEBHOOK_SECRET");

        if let Some(placeholder) = non_empty("STRIPE_SECRET_KEY_PLACEHOLDER") {
            config.secret_key_placeholder = placeholder;
        }
        if let Some(placeholder) = non_empty("STRIPE_WEBHOOK_SECRET_PLACEHOLDER") {
            config.webhook_secret_placeholder = placeholder;
        }
        if let Some(url) = non_empty("STRIPE_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Some(secs) = non_empty("STRIPE_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = non_empty("STRIPE_PRODUCT_LIMIT").and_then(|s| s.parse().ok()) {
            config.product_page_limit = limit;
        }

        config
    }

    /// Config with no secrets at all (pure mock mode)
    pub fn unconfigured() -> Self {
        Self {
            secret_key: None,
            webhook_secret: None,
            secret_key_placeholder: DEFAULT_SECRET_KEY_PLACEHOLDER.to_string(),
            webhook_secret_placeholder: DEFAULT_WEBHOOK_SECRET_PLACEHOLDER.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            product_page_limit: DEFAULT_PRODUCT_PAGE_LIMIT,
            webhook_tolerance_secs: DEFAULT_WEBHOOK_TOLERANCE_SECS,
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            secret_key: Some(secret_key.into()),
            webhook_secret: Some(webhook_secret.into()),
            ..Self::unconfigured()
        }
    }

    /// Secret key, unless absent or the placeholder
    pub fn live_secret_key(&self) -> Option<&str> {
        usable(self.secret_key.as_deref(), &self.secret_key_placeholder)
    }

    /// Webhook secret, unless absent or the placeholder
    pub fn live_webhook_secret(&self) -> Option<&str> {
        usable(self.webhook_secret.as_deref(), &self.webhook_secret_placeholder)
    }

    /// Mock when no usable secret key is configured, live otherwise
    pub fn mode(&self) -> Mode {
        match self.live_secret_key() {
            Some(_) => Mode::Live,
            None => Mode::Mock,
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.live_secret_key().unwrap_or_default())
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set the provider call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builder: override the placeholder sentinels
    pub fn with_placeholders(
        mut self,
        secret_key: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Self {
        self.secret_key_placeholder = secret_key.into();
        self.webhook_secret_placeholder = webhook_secret.into();
        self
    }
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self::unconfigured()
    }
}

fn usable<'a>(value: Option<&'a str>, placeholder: &str) -> Option<&'a str> {
    value.filter(|v| !v.trim().is_empty() && *v != placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(StripeConfig::unconfigured().mode(), Mode::Mock);

        let placeholder = StripeConfig::new(DEFAULT_SECRET_KEY_PLACEHOLDER, "whsec_x");
        assert_eq!(placeholder.mode(), Mode::Mock);

        let blank = StripeConfig::new("  ", "whsec_x");
        assert_eq!(blank.mode(), Mode::Mock);

        let live = StripeConfig::new("sk_test_abc123", "whsec_x");
        assert_eq!(live.mode(), Mode::Live);
    }

    #[test]
    fn test_webhook_secret_placeholder() {
        let config = StripeConfig::new("sk_test_abc", DEFAULT_WEBHOOK_SECRET_PLACEHOLDER);
        assert!(config.live_webhook_secret().is_none());

        let config = StripeConfig::new("sk_test_abc", "whsec_real");
        assert_eq!(config.live_webhook_secret(), Some("whsec_real"));
    }

    #[test]
    fn test_custom_placeholders() {
        let config = StripeConfig::new("sk_test_changeme", "whsec_changeme")
            .with_placeholders("sk_test_changeme", "whsec_changeme");

        assert_eq!(config.mode(), Mode::Mock);
        assert!(config.live_webhook_secret().is_none());
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123", "whsec_secret");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_from_lookup() {
        let config = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_API_KEY", "sk_test_fallback"),
            ("STRIPE_WEBHOOK_SECRET", "whsec_abc"),
            ("STRIPE_TIMEOUT_SECS", "5"),
            ("STRIPE_PRODUCT_LIMIT", "3"),
        ]));

        assert_eq!(config.secret_key.as_deref(), Some("sk_test_fallback"));
        assert_eq!(config.live_webhook_secret(), Some("whsec_abc"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.product_page_limit, 3);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_from_lookup_prefers_secret_key() {
        let config = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_test_primary"),
            ("STRIPE_API_KEY", "sk_test_fallback"),
        ]));
        assert_eq!(config.live_secret_key(), Some("sk_test_primary"));
    }

    #[test]
    fn test_from_lookup_empty_env_is_mock() {
        let config = StripeConfig::from_lookup(lookup(&[("STRIPE_SECRET_KEY", "")]));
        assert_eq!(config.mode(), Mode::Mock);
        assert!(config.live_webhook_secret().is_none());
    }

    #[test]
    fn test_placeholder_override_from_env() {
        let config = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_replace_me"),
            ("STRIPE_SECRET_KEY_PLACEHOLDER", "sk_replace_me"),
        ]));
        assert_eq!(config.mode(), Mode::Mock);
    }
}
