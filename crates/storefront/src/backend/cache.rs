//! Cache types for order backend responses.

use crate::orders::types::{Order, OrderSummary};

/// Cache key for backend reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Order(String),
    OrdersForEmail(String),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Order(Box<Order>),
    Orders(Vec<OrderSummary>),
}
