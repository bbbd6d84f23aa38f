//! # Stripe REST Client
//!
//! Live-mode implementation of `PaymentProvider` against the Stripe API:
//! Checkout Sessions for session creation, Products and Prices for listings.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider, PaymentResult, Price, Product,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const PROVIDER: &str = "stripe";

/// Stripe API client
pub struct StripeClient {
    config: StripeConfig,
    client: Client,
}

impl StripeClient {
    /// Create a new client; every call is bounded by `config.request_timeout`
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PaymentError::RequestError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(StripeConfig::from_env())
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.api_base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
    }

    /// Send a request and decode a successful JSON body.
    ///
    /// Non-2xx responses keep Stripe's own error message.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PaymentResult<T> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::provider(PROVIDER, error_response.error.message));
            }

            return Err(PaymentError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::provider(PROVIDER, format!("Failed to parse Stripe response: {}", e))
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> PaymentError {
        if err.is_timeout() {
            PaymentError::provider(
                PROVIDER,
                format!(
                    "Request timed out after {}s",
                    self.config.request_timeout.as_secs_f64()
                ),
            )
        } else {
            PaymentError::provider(PROVIDER, err.to_string())
        }
    }

    async fn list_prices(&self, product_id: &str) -> PaymentResult<Vec<Price>> {
        let request = self
            .client
            .get(self.url("prices"))
            .query(&[("product", product_id), ("active", "true")]);

        let prices: StripeList<StripePrice> = self.send(request).await?;

        Ok(prices
            .data
            .into_iter()
            .filter_map(StripePrice::into_price)
            .collect())
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[instrument(skip(self, request), fields(price_id = %request.price_id))]
    async fn create_session(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutSession> {
        let form_params = [
            ("mode", "payment"),
            ("payment_method_types[0]", "card"),
            ("line_items[0][price]", request.price_id.as_str()),
            ("line_items[0][quantity]", "1"),
            ("success_url", request.success_url.as_str()),
            ("cancel_url", request.cancel_url.as_str()),
        ];

        let http_request = self
            .client
            .post(self.url("checkout/sessions"))
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .form(&form_params);

        let session: StripeCheckoutSessionResponse = self.send(http_request).await?;

        let url = session.url.ok_or_else(|| {
            PaymentError::provider(PROVIDER, format!("Session {} has no redirect URL", session.id))
        })?;

        info!("Created Stripe checkout session: id={}", session.id);

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> PaymentResult<Vec<Product>> {
        let limit = self.config.product_page_limit.to_string();
        let request = self
            .client
            .get(self.url("products"))
            .query(&[("active", "true"), ("limit", limit.as_str())]);

        let products: StripeList<StripeProduct> = self.send(request).await?;
        debug!("Fetched {} active products", products.data.len());

        let mut listed = Vec::with_capacity(products.data.len());
        for product in products.data {
            let prices = self.list_prices(&product.id).await?;
            listed.push(Product {
                image: product.images.into_iter().next(),
                description: product.description.unwrap_or_default(),
                id: product.id,
                name: product.name,
                prices,
            });
        }

        Ok(listed)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeList<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeProduct {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    images: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StripePrice {
    id: String,
    currency: String,
    /// Minor units; absent for custom-amount prices
    #[serde(default)]
    unit_amount: Option<i64>,
    #[serde(default)]
    recurring: Option<serde_json::Value>,
}

impl StripePrice {
    fn into_price(self) -> Option<Price> {
        let amount = self.unit_amount?;
        let recurring = self.recurring.is_some_and(|r| !r.is_null());
        Some(Price::from_minor_units(self.id, self.currency, amount, recurring))
    }
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> StripeClient {
        let config = StripeConfig::new("sk_test_abc123", "whsec_x").with_api_base_url(server.uri());
        StripeClient::new(config).unwrap()
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest::new(
            "price_123",
            "https://shop.example.com/success",
            "https://shop.example.com/cancel",
        )
    }

    #[test]
    fn test_price_conversion() {
        let price = StripePrice {
            id: "price_1".to_string(),
            currency: "usd".to_string(),
            unit_amount: Some(1999),
            recurring: Some(json!({ "interval": "month" })),
        }
        .into_price()
        .unwrap();

        assert_eq!(price.unit_amount, 19.99);
        assert!(price.recurring);

        let one_time = StripePrice {
            id: "price_2".to_string(),
            currency: "usd".to_string(),
            unit_amount: Some(500),
            recurring: Some(serde_json::Value::Null),
        }
        .into_price()
        .unwrap();
        assert!(!one_time.recurring);

        let custom = StripePrice {
            id: "price_3".to_string(),
            currency: "usd".to_string(),
            unit_amount: None,
            recurring: None,
        };
        assert!(custom.into_price().is_none());
    }

    #[tokio::test]
    async fn test_create_session() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .and(header_exists("Idempotency-Key"))
            .and(body_string_contains("mode=payment"))
            .and(body_string_contains("line_items%5B0%5D%5Bprice%5D=price_123"))
            .and(body_string_contains("line_items%5B0%5D%5Bquantity%5D=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_live_1",
                "url": "https://checkout.stripe.com/c/pay/cs_test_live_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = client_for(&server).create_session(&request()).await.unwrap();

        assert_eq!(session.id, "cs_test_live_1");
        assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_live_1");
    }

    #[tokio::test]
    async fn test_create_session_provider_error_message_kept() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "No such price: 'price_123'", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).create_session(&request()).await.unwrap_err();

        match err {
            PaymentError::ProviderError { provider, message } => {
                assert_eq!(provider, "stripe");
                assert_eq!(message, "No such price: 'price_123'");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": "cs_slow", "url": "https://x" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = StripeConfig::new("sk_test_abc123", "whsec_x")
            .with_api_base_url(server.uri())
            .with_timeout(Duration::from_millis(100));
        let client = StripeClient::new(config).unwrap();

        let err = client.create_session(&request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::ProviderError { ref message, .. } if message.contains("timed out")));
    }

    #[tokio::test]
    async fn test_list_products_with_prices() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .and(query_param("active", "true"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "data": [
                    { "id": "prod_a", "name": "Alpha", "description": "First", "images": ["https://img/a.png"] },
                    { "id": "prod_b", "name": "Beta", "description": null, "images": [] }
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/prices"))
            .and(query_param("product", "prod_a"))
            .and(query_param("active", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": "price_a_m", "currency": "usd", "unit_amount": 1999, "recurring": { "interval": "month" } },
                    { "id": "price_a_once", "currency": "usd", "unit_amount": 4900, "recurring": null }
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/prices"))
            .and(query_param("product", "prod_b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let products = client_for(&server).list_products().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "prod_a");
        assert_eq!(products[0].image.as_deref(), Some("https://img/a.png"));
        assert_eq!(products[0].prices.len(), 2);
        assert_eq!(products[0].prices[0].unit_amount, 19.99);
        assert!(products[0].prices[0].recurring);
        assert!(!products[0].prices[1].recurring);

        assert_eq!(products[1].description, "");
        assert!(products[1].image.is_none());
        assert!(products[1].prices.is_empty());
    }

    #[tokio::test]
    async fn test_list_products_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Invalid API Key provided: sk_test_****" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).list_products().await.unwrap_err();
        assert!(matches!(err, PaymentError::ProviderError { ref message, .. } if message.starts_with("Invalid API Key")));
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_products().await.unwrap_err();
        assert!(matches!(err, PaymentError::ProviderError { ref message, .. } if message.contains("bad gateway")));
    }
}
