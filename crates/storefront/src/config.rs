//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDERTRAIL_BACKEND_URL` - Base URL of the merchant order backend
//! - `ORDERTRAIL_BACKEND_TOKEN` - Access token for the order backend
//!
//! ## Optional
//! - `ORDERTRAIL_HOST` - Bind address (default: 127.0.0.1)
//! - `ORDERTRAIL_PORT` - Listen port (default: 3000)
//! - `MERCHANT_OFFERS_EXCHANGES` - Whether the merchant supports item
//!   exchanges in addition to returns (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_TOKEN_LENGTH: usize = 16;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Merchant order backend configuration
    pub backend: BackendConfig,
    /// Merchant-specific presentation behavior
    pub merchant: MerchantConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
}

/// Merchant order backend configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the order backend (e.g. <https://api.example.com>)
    pub base_url: url::Url,
    /// Access token sent as a bearer credential
    pub access_token: SecretString,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Merchant-conditional presentation behavior.
///
/// The original configuration was a global lookup keyed by merchant
/// identifier; here it is an explicit parameter threaded through the
/// derivation functions.
#[derive(Debug, Clone, Default)]
pub struct MerchantConfig {
    /// Merchants supporting exchanges show a combined "Return / Exchange"
    /// action and list return actions first on delivered orders.
    pub offers_exchanges: bool,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the backend token fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ORDERTRAIL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ORDERTRAIL_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ORDERTRAIL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ORDERTRAIL_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            host,
            port,
            backend: BackendConfig::from_env()?,
            merchant: MerchantConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("ORDERTRAIL_BACKEND_URL")?;
        let base_url = url::Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("ORDERTRAIL_BACKEND_URL".to_string(), e.to_string())
        })?;

        let token = get_required_env("ORDERTRAIL_BACKEND_TOKEN")?;
        validate_token("ORDERTRAIL_BACKEND_TOKEN", &token)?;

        Ok(Self {
            base_url,
            access_token: SecretString::from(token),
        })
    }
}

impl MerchantConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let offers_exchanges = match get_optional_env("MERCHANT_OFFERS_EXCHANGES") {
            None => false,
            Some(value) => value.parse::<bool>().map_err(|e| {
                ConfigError::InvalidEnvVar("MERCHANT_OFFERS_EXCHANGES".to_string(), e.to_string())
            })?,
        };
        Ok(Self { offers_exchanges })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that an access token is not a placeholder and meets the minimum
/// length.
fn validate_token(var_name: &str, token: &str) -> Result<(), ConfigError> {
    if token.len() < MIN_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {MIN_TOKEN_LENGTH} characters (got {})",
                token.len()
            ),
        ));
    }

    let lower = token.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
