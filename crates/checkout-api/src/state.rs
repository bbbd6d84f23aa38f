//! # Application State
//!
//! Shared state for the Axum application: the payment facade and the
//! server's own settings. Both are built once at startup and never mutated.

use checkout_stripe::{PaymentFacade, StripeConfig};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Origins allowed by CORS; `*` allows any
    pub cors_allowed_origins: Vec<String>,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .filter(|origins: &Vec<String>| !origins.is_empty())
                .unwrap_or_else(|| vec!["*".to_string()]),
            json_logs: lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}: {}", addr, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// True when any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout, webhook and listing operations
    pub facade: PaymentFacade,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build state from environment variables
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let facade = PaymentFacade::new(StripeConfig::from_env())
            .map_err(|e| anyhow::anyhow!("Failed to initialize payment facade: {}", e))?;

        Ok(Self { facade, config })
    }

    /// Build state from explicit parts (for tests and embedding)
    pub fn with_facade(facade: PaymentFacade, config: AppConfig) -> Self {
        Self { facade, config }
    }
}
