//! # Request Handlers
//!
//! Axum request handlers for the payment API. Each handler is a thin shell
//! around one `PaymentFacade` operation; errors become JSON bodies with the
//! facade's status code.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use checkout_core::{CheckoutRequest, CheckoutSession, PaymentError, Product};
use checkout_stripe::{WebhookReceipt, SIGNATURE_HEADER};
use serde::{Deserialize, Serialize};
use tracing::{error, field, info, instrument, warn, Span};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Product listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Body extraction failures share the error shape and always count as a bad request
fn json_rejection_to_response(rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection.body_text());
    let response = ErrorResponse::new(rejection.body_text(), StatusCode::BAD_REQUEST.as_u16());
    (StatusCode::BAD_REQUEST, Json(response))
}

// =============================================================================
// Handlers
// =============================================================================

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Create a checkout session
#[instrument(skip(state, payload), fields(price_id = field::Empty, mode = %state.facade.mode()))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutSession>, ApiError> {
    let Json(request) = payload.map_err(json_rejection_to_response)?;
    Span::current().record("price_id", request.price_id.as_str());

    let session = state
        .facade
        .create_checkout_session(&request)
        .await
        .map_err(|e| {
            error!("Failed to create checkout session: {}", e);
            payment_error_to_response(e)
        })?;

    info!("Created checkout session: {}", session.id);

    Ok(Json(session))
}

/// Handle Stripe webhook
#[instrument(skip(state, headers, body))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookReceipt>, ApiError> {
    // A missing header is left to the facade so an unset secret is reported first
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let receipt = state
        .facade
        .handle_webhook(&body, signature)
        .map_err(|e| {
            error!("Webhook handling failed: {}", e);
            payment_error_to_response(e)
        })?;

    Ok(Json(receipt))
}

/// List purchasable products
#[instrument(skip(state), fields(mode = %state.facade.mode()))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let products = state.facade.list_products().await.map_err(|e| {
        error!("Failed to list products: {}", e);
        payment_error_to_response(e)
    })?;

    Ok(Json(ProductsResponse { products }))
}
