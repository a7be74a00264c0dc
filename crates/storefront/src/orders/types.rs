//! Raw order records as fetched from the merchant order backend.
//!
//! Field presence mirrors the backend contract: `trackingDetails` is
//! optional, `fulfillments[0].trackingInfo[0]` is optional, the shipping
//! address is nullable, and `originalOrder` only exists for edited orders.
//! Absence of an optional field is an expected state, never a fault.

use chrono::{DateTime, Utc};
use ordertrail_core::{Money, TrackingStatus};
use serde::{Deserialize, Serialize};

/// An order as returned by the list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Global id (e.g. "gid://shopify/Order/123").
    pub id: String,
    /// Human-readable order name (e.g. "#1001").
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Raw order status code; parse via `OrderStatus::parse`.
    pub fulfillment_status: String,
    #[serde(default)]
    pub shipped_at: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
    pub current_total_price: Money,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub tracking_details: Option<TrackingDetail>,
}

/// An order as returned by the detail endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Raw order status code; parse via `OrderStatus::parse`.
    pub fulfillment_status: String,
    #[serde(default)]
    pub shipped_at: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
    #[serde(default)]
    pub fulfillments: Vec<Fulfillment>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    pub total_shipping_price: Money,
    pub current_total_tax: Money,
    pub current_total_price: Money,
    pub current_total_discounts: Money,
    #[serde(default)]
    pub refunded_price: Option<Money>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub cancelation_request: Option<CancelationRequest>,
    #[serde(default)]
    pub original_order: Option<OriginalOrder>,
    #[serde(default)]
    pub tracking_details: Option<TrackingDetail>,
    /// Error message from the tracking lookup, if the backend failed to
    /// resolve carrier status for this order.
    #[serde(default)]
    pub tracking_info_error_message: Option<String>,
}

impl Order {
    /// The customer-facing tracking link: first fulfillment's first
    /// tracking info entry, when present.
    #[must_use]
    pub fn tracking_info(&self) -> Option<&TrackingInfo> {
        self.fulfillments.first().and_then(|f| f.tracking_info.first())
    }
}

/// A purchased line item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<Image>,
    pub current_quantity: i64,
    /// Per-line total after discounts. Absent on list records.
    #[serde(default)]
    pub discounted_total: Option<Money>,
}

/// A product image reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
}

impl Image {
    /// CDN URL for an 80px thumbnail rendition.
    #[must_use]
    pub fn thumbnail(&self) -> String {
        if self.url.contains('?') {
            format!("{}&width=80", self.url)
        } else {
            format!("{}?width=80", self.url)
        }
    }
}

/// A fulfillment with its carrier tracking references.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default)]
    pub tracking_info: Vec<TrackingInfo>,
}

/// Carrier tracking reference attached to a fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfo {
    pub number: String,
    pub company: String,
    pub url: String,
}

/// Shipping destination. Nullable on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub name: String,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub province: Option<String>,
    pub zip: String,
    pub country: String,
}

/// A customer's request to cancel the order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelationRequest {
    pub is_failed: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Snapshot of the order before it was edited, shown when the edit
/// requires additional payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalOrder {
    pub total_shipping_price: Money,
    pub current_total_tax: Money,
    pub current_total_price: Money,
    pub current_total_discounts: Money,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// Carrier tracking detail resolved by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingDetail {
    /// Fine-grained carrier event code (e.g. "out_for_delivery").
    pub status_milestone: String,
    /// Coarse tracking status. Older backend responses omit it, in which
    /// case it is derived from the milestone.
    #[serde(default)]
    pub status: Option<TrackingStatus>,
    #[serde(default)]
    pub estimated_delivery_date: Option<String>,
    #[serde(default)]
    pub delivered_date_time: Option<String>,
    #[serde(default)]
    pub last_event: Option<TrackingEvent>,
}

impl TrackingDetail {
    /// Coarse tracking status, falling back to the milestone mapping when
    /// the backend did not send one.
    #[must_use]
    pub fn coarse_status(&self) -> TrackingStatus {
        self.status
            .unwrap_or_else(|| TrackingStatus::from_milestone(&self.status_milestone))
    }
}

/// The most recent carrier scan event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    pub occurrence_datetime: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub geo_coordinates: Option<GeoCoordinates>,
}

/// Geographic position of a carrier event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Extract the trailing numeric id from a global id.
///
/// "gid://shopify/Order/123" becomes "123". Ids without slashes pass
/// through unchanged.
#[must_use]
pub fn extract_order_id(full_id: &str) -> &str {
    full_id.rsplit('/').next().unwrap_or(full_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_order_id() {
        assert_eq!(extract_order_id("gid://shopify/Order/5551212"), "5551212");
        assert_eq!(extract_order_id("5551212"), "5551212");
    }

    #[test]
    fn test_order_summary_minimal_fields() {
        let order: OrderSummary = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Order/1",
            "name": "#1001",
            "createdAt": "2024-03-01T12:00:00Z",
            "fulfillmentStatus": "SHIPPED",
            "currentTotalPrice": { "amount": "42.00", "currencyCode": "USD" },
        }))
        .unwrap();

        assert!(order.shipped_at.is_none());
        assert!(order.tracking_details.is_none());
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn test_order_optional_fields_absent() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Order/1",
            "name": "#1001",
            "createdAt": "2024-03-01T12:00:00Z",
            "fulfillmentStatus": "ORDERED",
            "totalShippingPrice": { "amount": "4.90", "currencyCode": "USD" },
            "currentTotalTax": { "amount": "2.00", "currencyCode": "USD" },
            "currentTotalPrice": { "amount": "48.90", "currencyCode": "USD" },
            "currentTotalDiscounts": { "amount": "0", "currencyCode": "USD" },
        }))
        .unwrap();

        assert!(order.shipping_address.is_none());
        assert!(order.original_order.is_none());
        assert!(order.cancelation_request.is_none());
        assert!(order.tracking_info().is_none());
    }

    #[test]
    fn test_tracking_detail_status_fallback() {
        let detail: TrackingDetail = serde_json::from_value(serde_json::json!({
            "statusMilestone": "available_for_pickup",
        }))
        .unwrap();
        assert_eq!(
            detail.coarse_status(),
            ordertrail_core::TrackingStatus::DeliveryException
        );

        let detail: TrackingDetail = serde_json::from_value(serde_json::json!({
            "statusMilestone": "in_transit",
            "status": "DELIVERED",
        }))
        .unwrap();
        // An explicit status wins over the milestone mapping.
        assert_eq!(
            detail.coarse_status(),
            ordertrail_core::TrackingStatus::Delivered
        );
    }
}
