//! # Payment Facade
//!
//! The three operations the HTTP layer exposes. Each call re-evaluates the
//! mode from configuration, then either synthesizes a response (mock) or
//! delegates to the provider (live).

use crate::client::StripeClient;
use crate::config::StripeConfig;
use crate::mock::mock_session;
use crate::webhook::WebhookVerifier;
use checkout_core::{
    dispatch_webhook_event, BoxedPaymentProvider, CheckoutRequest, CheckoutSession,
    LoggingWebhookHandler, Mode, PaymentError, PaymentResult, Product, ProductCatalog,
    RandomSource, ThreadRandom, WebhookHandler,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Acknowledgement returned once a webhook has been authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookReceipt {
    pub success: bool,
}

/// Entry point for checkout, webhook and listing operations
#[derive(Clone)]
pub struct PaymentFacade {
    config: StripeConfig,
    provider: BoxedPaymentProvider,
    random: Arc<dyn RandomSource>,
    webhook_handler: Arc<dyn WebhookHandler>,
    verifier: WebhookVerifier,
}

impl PaymentFacade {
    /// Facade backed by the Stripe REST client and a thread-local RNG
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let provider = Arc::new(StripeClient::new(config.clone())?);
        Ok(Self::with_provider(config, provider))
    }

    /// Facade with a caller-supplied provider
    pub fn with_provider(config: StripeConfig, provider: BoxedPaymentProvider) -> Self {
        let verifier = WebhookVerifier::new(config.webhook_tolerance_secs);
        Self {
            config,
            provider,
            random: Arc::new(ThreadRandom),
            webhook_handler: Arc::new(LoggingWebhookHandler),
            verifier,
        }
    }

    /// Builder: replace the random source used for mock redirects
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Builder: replace the handler that observes verified events
    pub fn with_webhook_handler(mut self, handler: Arc<dyn WebhookHandler>) -> Self {
        self.webhook_handler = handler;
        self
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Current mode; never cached
    pub fn mode(&self) -> Mode {
        self.config.mode()
    }

    /// Create a checkout session for one unit of `request.price_id`
    #[instrument(skip(self, request), fields(price_id = %request.price_id))]
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> PaymentResult<CheckoutSession> {
        request.validate()?;

        match self.mode() {
            Mode::Mock => {
                let session = mock_session(request, self.random.as_ref());
                debug!("Mock checkout session: id={}, url={}", session.id, session.url);
                Ok(session)
            }
            Mode::Live => self.provider.create_session(request).await,
        }
    }

    /// Authenticate a webhook call and hand the event to the handler.
    ///
    /// A missing signing secret is reported before any signature work.
    #[instrument(skip(self, payload, signature), fields(bytes = payload.len()))]
    pub fn handle_webhook(&self, payload: &[u8], signature: &str) -> PaymentResult<WebhookReceipt> {
        let secret = self.config.live_webhook_secret().ok_or_else(|| {
            PaymentError::NotConfigured("Stripe webhook secret is not configured".to_string())
        })?;

        let event = self
            .verifier
            .verify(payload, signature, secret)
            .map_err(|e| {
                warn!("Webhook rejected: {}", e);
                e
            })?;

        info!("Received webhook: type={}, id={}", event.event_type, event.id);

        dispatch_webhook_event(self.webhook_handler.as_ref(), &event)?;

        Ok(WebhookReceipt { success: true })
    }

    /// List purchasable products; products with no prices are dropped
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> PaymentResult<Vec<Product>> {
        match self.mode() {
            Mode::Mock => Ok(ProductCatalog::demo().into_products()),
            Mode::Live => {
                let mut catalog = ProductCatalog::new();
                for product in self.provider.list_products().await? {
                    if !product.is_purchasable() {
                        debug!("Skipping product without active prices: {}", product.id);
                    }
                    catalog.add(product);
                }
                Ok(catalog.into_products())
            }
        }
    }
}
