//! # Payment Error Types
//!
//! Typed error handling for the checkout facade.
//! All facade operations return `Result<T, PaymentError>`, and callers
//! match on the variant rather than inspecting messages.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Malformed caller input (empty price id, missing redirect URL, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider call failed, timed out, or returned an error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Webhook signature could not be authenticated
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// A required secret is absent or still set to its placeholder
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Anything that does not fit the categories above
    #[error("Request error: {0}")]
    RequestError(String),
}

impl PaymentError {
    /// Shorthand for a provider error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ProviderError {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Only a missing server-side secret is a server fault; everything else
    /// is reported to the caller as a client error.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::NotConfigured(_) => 500,
            PaymentError::InvalidRequest(_)
            | PaymentError::ProviderError { .. }
            | PaymentError::InvalidSignature(_)
            | PaymentError::RequestError(_) => 400,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
