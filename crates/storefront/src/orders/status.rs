//! One-line status derivation for the order list, plus the date and label
//! helpers shared with the detail view.

use chrono::{DateTime, NaiveDate};
use ordertrail_core::{OrderStatus, TrackingStatus};

use super::types::{OrderSummary, TrackingDetail};

/// Carrier milestone that flips a shipped order to "out for delivery".
pub(crate) const MILESTONE_OUT_FOR_DELIVERY: &str = "out_for_delivery";

/// Carrier milestone for parcels waiting at a pickup point.
pub(crate) const MILESTONE_AVAILABLE_FOR_PICKUP: &str = "available_for_pickup";

/// Badge label for each order status.
#[must_use]
pub const fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Ordered => "Ordered",
        OrderStatus::Shipped => "Shipped",
        OrderStatus::Delivered => "Delivered",
        OrderStatus::Refunded => "Refunded",
        OrderStatus::CancelationRequested => "Cancelation requested",
        OrderStatus::PaymentPending => "Pending payment",
        OrderStatus::OnHold => "On hold",
        OrderStatus::DeliveryException => "Delivery exception",
        OrderStatus::DeliveryFailure => "Delivery failed",
    }
}

/// Headline label for each coarse tracking status.
#[must_use]
pub const fn tracking_label(status: TrackingStatus) -> &'static str {
    match status {
        TrackingStatus::Delivered => "Delivered",
        TrackingStatus::Shipped => "Shipped",
        TrackingStatus::DeliveryException => "Delivery exception",
        TrackingStatus::DeliveryFailure => "Delivery failed",
    }
}

/// Parse a backend timestamp down to a calendar day.
///
/// The backend mixes RFC 3339 timestamps and bare `YYYY-MM-DD` dates
/// depending on which upstream field the value came from.
pub(crate) fn parse_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Format a day as e.g. "Mar 4, 2024".
pub(crate) fn format_day(day: NaiveDate) -> String {
    day.format("%b %-d, %Y").to_string()
}

/// Label override and display date drawn from live tracking data.
pub(crate) struct TrackingGlance {
    /// Replaces the status-derived label when present.
    pub label: Option<&'static str>,
    pub date: Option<NaiveDate>,
}

/// Refine a status line using the carrier's tracking detail.
///
/// Shipped orders show the shipment date until the carrier reports an
/// estimated delivery date or the out-for-delivery milestone; delivered
/// orders prefer the carrier's delivery timestamp over the order record's;
/// pickup-point exceptions surface the last event's timestamp.
pub(crate) fn tracking_glance(
    detail: &TrackingDetail,
    shipped_at: Option<&str>,
    delivered_at: Option<&str>,
) -> TrackingGlance {
    match detail.coarse_status() {
        TrackingStatus::Shipped => {
            if detail.status_milestone == MILESTONE_OUT_FOR_DELIVERY {
                TrackingGlance {
                    label: Some("Out for delivery"),
                    date: shipped_at.and_then(parse_day),
                }
            } else if let Some(estimate) = detail
                .estimated_delivery_date
                .as_deref()
                .filter(|s| !s.is_empty())
            {
                TrackingGlance {
                    label: Some("Est. delivery"),
                    date: parse_day(estimate),
                }
            } else {
                TrackingGlance {
                    label: None,
                    date: shipped_at.and_then(parse_day),
                }
            }
        }
        TrackingStatus::Delivered => TrackingGlance {
            label: None,
            date: detail
                .delivered_date_time
                .as_deref()
                .or(delivered_at)
                .and_then(parse_day),
        },
        TrackingStatus::DeliveryException
            if detail.status_milestone == MILESTONE_AVAILABLE_FOR_PICKUP =>
        {
            TrackingGlance {
                label: Some("Available for pickup"),
                date: detail
                    .last_event
                    .as_ref()
                    .and_then(|event| parse_day(&event.occurrence_datetime)),
            }
        }
        TrackingStatus::DeliveryException | TrackingStatus::DeliveryFailure => TrackingGlance {
            label: None,
            date: None,
        },
    }
}

/// Derive the one-line status shown on an order card.
///
/// Combines the status badge label with a display date when one applies,
/// e.g. "Shipped Mar 1, 2024". An unknown status code yields an empty
/// string; the list is best-effort and never errors on a single order.
#[must_use]
pub fn list_status(order: &OrderSummary) -> String {
    let status = OrderStatus::parse(&order.fulfillment_status);
    let mut label = status.map_or("", status_label);

    let date = if let Some(detail) = &order.tracking_details {
        let glance = tracking_glance(
            detail,
            order.shipped_at.as_deref(),
            order.delivered_at.as_deref(),
        );
        if let Some(refined) = glance.label {
            label = refined;
        }
        glance.date
    } else {
        match status {
            Some(OrderStatus::Shipped) => order.shipped_at.as_deref().and_then(parse_day),
            Some(OrderStatus::Delivered) => order.delivered_at.as_deref().and_then(parse_day),
            _ => None,
        }
    };

    match date {
        Some(day) if !label.is_empty() => format!("{label} {}", format_day(day)),
        _ => label.to_owned(),
    }
}
