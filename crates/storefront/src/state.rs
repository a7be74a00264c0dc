//! Shared application state.

use std::sync::Arc;

use crate::backend::OrdersApi;
use crate::config::{MerchantConfig, StorefrontConfig};

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    orders: OrdersApi,
}

impl AppState {
    /// Build the state from loaded configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let orders = OrdersApi::new(&config.backend);
        Self {
            inner: Arc::new(AppStateInner { config, orders }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn merchant(&self) -> &MerchantConfig {
        &self.inner.config.merchant
    }

    #[must_use]
    pub fn orders(&self) -> &OrdersApi {
        &self.inner.orders
    }
}
