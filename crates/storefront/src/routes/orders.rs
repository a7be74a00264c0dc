//! Order list and detail handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::MerchantConfig;
use crate::error::{AppError, Result};
use crate::notify::{Notify, Toast, ToastBuffer};
use crate::orders::{detail_page, order_cards, Order, OrderCard, OrderDetailPage};
use crate::state::AppState;

/// Toast id for the unknown-status fallback on the detail page.
pub const TOAST_ORDER_DETAIL_ERROR: &str = "error-order-detail";

const ORDER_DETAIL_ERROR_MESSAGE: &str =
    "Oops! Our server has a temporary error\nPlease try again later";

#[derive(Debug, Deserialize)]
pub struct ListParams {
    email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListResponse {
    orders: Vec<OrderCard>,
}

/// GET /orders?email=... - all orders for a customer, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<OrderListResponse>> {
    let email = params.email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("email is required".to_string()));
    }

    let summaries = state.orders().orders_for_email(email).await?;
    Ok(Json(OrderListResponse {
        orders: order_cards(&summaries),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResponse {
    /// Absent when the order's status code is unknown; the client renders
    /// nothing and shows the queued toast instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<OrderDetailPage>,
    toasts: Vec<Toast>,
}

/// GET /orders/{id} - the composed detail page for one order.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderDetailResponse>> {
    let order = state.orders().order(&id).await?;
    Ok(Json(build_detail_response(&order, state.merchant())))
}

/// Compose the detail response, degrading to a toast-only payload when the
/// order's status code is unknown.
fn build_detail_response(order: &Order, merchant: &MerchantConfig) -> OrderDetailResponse {
    let buffer = ToastBuffer::new();
    match detail_page(order, merchant, &buffer) {
        Ok(page) => OrderDetailResponse {
            order: Some(page),
            toasts: buffer.into_toasts(),
        },
        Err(err) => {
            let event_id = sentry::capture_error(&err);
            tracing::warn!(
                error = %err,
                sentry_event_id = %event_id,
                "order has an unknown status code"
            );
            buffer.push(Toast::new(TOAST_ORDER_DETAIL_ERROR, ORDER_DETAIL_ERROR_MESSAGE).multiline());
            OrderDetailResponse {
                order: None,
                toasts: buffer.into_toasts(),
            }
        }
    }
}
