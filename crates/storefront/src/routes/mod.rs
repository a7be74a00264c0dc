//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET /health               - Health check
//!
//! # Orders
//! GET /orders?email=...     - Order list for a customer
//! GET /orders/{id}          - Order detail page
//! ```

pub mod orders;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list))
        .route("/{id}", get(orders::detail))
}
