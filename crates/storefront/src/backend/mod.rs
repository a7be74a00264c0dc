//! Client for the merchant order backend.
//!
//! Plain JSON over HTTP via `reqwest`, with a short-lived `moka` cache so a
//! burst of renders for the same customer does not fan out into duplicate
//! backend calls.

mod cache;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::BackendConfig;
use crate::orders::types::{Order, OrderSummary};

use cache::{CacheKey, CacheValue};

/// Errors from the order backend.
#[derive(Debug, Error)]
pub enum OrdersApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Backend returned a non-success status.
    #[error("Backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The configured backend URL cannot take path segments.
    #[error("Backend base URL cannot be a base")]
    InvalidBaseUrl,
}

#[derive(Debug, Deserialize)]
struct OrdersEnvelope {
    orders: Vec<OrderSummary>,
}

#[derive(Debug, Deserialize)]
struct OrderEnvelope {
    order: Option<Order>,
}

/// Client for the merchant order backend.
///
/// Cheap to clone; order reads are cached for one minute.
#[derive(Clone)]
pub struct OrdersApi {
    inner: Arc<OrdersApiInner>,
}

struct OrdersApiInner {
    client: reqwest::Client,
    base_url: Url,
    access_token: SecretString,
    cache: Cache<CacheKey, CacheValue>,
}

impl OrdersApi {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(60))
            .build();

        Self {
            inner: Arc::new(OrdersApiInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                access_token: config.access_token.clone(),
                cache,
            }),
        }
    }

    /// Fetch a single order by its bare id.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersApiError::NotFound`] when the backend has no such
    /// order, or a transport/parse error otherwise.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order(&self, id: &str) -> Result<Order, OrdersApiError> {
        let cache_key = CacheKey::Order(id.to_owned());
        if let Some(CacheValue::Order(order)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for order");
            return Ok(*order);
        }

        let url = join_segments(&self.inner.base_url, &["orders", id])?;
        let envelope: OrderEnvelope = self.get_json(url).await?;
        let order = envelope
            .order
            .ok_or_else(|| OrdersApiError::NotFound(format!("order {id}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Order(Box::new(order.clone())))
            .await;
        Ok(order)
    }

    /// Fetch all orders placed by a customer email.
    ///
    /// # Errors
    ///
    /// Returns a transport or parse error; an unknown email is an empty
    /// list, not an error.
    #[instrument(skip(self, email))]
    pub async fn orders_for_email(&self, email: &str) -> Result<Vec<OrderSummary>, OrdersApiError> {
        let cache_key = CacheKey::OrdersForEmail(email.to_owned());
        if let Some(CacheValue::Orders(orders)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for order list");
            return Ok(orders);
        }

        let url = join_segments(&self.inner.base_url, &["orders", "email", email])?;
        let envelope: OrdersEnvelope = self.get_json(url).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Orders(envelope.orders.clone()))
            .await;
        Ok(envelope.orders)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, OrdersApiError> {
        let path = url.path().to_owned();
        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(self.inner.access_token.expose_secret())
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(OrdersApiError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OrdersApiError::NotFound(path));
        }

        // Read the body as text first for better error diagnostics.
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "order backend returned non-success status"
            );
            return Err(OrdersApiError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse order backend response"
            );
            OrdersApiError::Parse(e)
        })
    }
}

/// Append path segments to the configured base URL.
fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, OrdersApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| OrdersApiError::InvalidBaseUrl)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
