//! Order detail view-model derivation.
//!
//! [`detail_status`] produces the status bundle (alerts, progress bar,
//! tracking) from an order and its page state; [`detail_page`] composes the
//! full detail page on top of it. Both are pure apart from the explicitly
//! threaded [`Notify`] sink.

use ordertrail_core::{Money, OrderStatus, TrackingStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::page_state::{
    exception_steps, Action, Alert, AlertAction, AlertKind, AlertPosition, ButtonBehavior,
    PageState, StatusBar,
};
use super::status::{
    format_day, tracking_glance, tracking_label, MILESTONE_AVAILABLE_FOR_PICKUP,
};
use super::types::{
    extract_order_id, GeoCoordinates, Image, LineItem, Order, ShippingAddress, TrackingInfo,
};
use crate::config::MerchantConfig;
use crate::notify::{Notify, Toast};

/// Contact-us problem category for undelivered orders.
const PROBLEM_CATEGORY_NOT_DELIVERED: &str = "POST_PURCHASE/DELIVERY/LATE/NOT_DELIVERED";

/// Toast id for missing tracking signals.
pub const TOAST_TRACKING_OUTAGE: &str = "error-tracking-details";

const TRACKING_OUTAGE_MESSAGE: &str = "We're experiencing a temporary outage and can't find \
                                       tracking info. Click on the tracking URL to find your \
                                       package.";

/// The order's raw status code matched no known [`OrderStatus`].
///
/// This is an unrecoverable data error for the detail render; the route
/// layer reports it and degrades to an empty page with a generic toast.
#[derive(Debug, Error)]
#[error("State \"{0}\" doesn't exist")]
pub struct UnknownStatusError(pub String);

/// Live tracking panel on the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    /// Headline, e.g. "Out for delivery". Absent in the URL-only fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<GeoCoordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<TrackingInfo>,
}

/// The status bundle consumed by the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailStatus {
    pub alerts: Vec<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bar: Option<StatusBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingView>,
}

/// One row of the price breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLine {
    pub label: &'static str,
    pub amount: String,
    pub line_through: bool,
    pub bold: bool,
}

/// A product entry on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// Pre-edit order snapshot shown in the comparison panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalOrderView {
    pub products: Vec<ProductView>,
    pub price_summary: Vec<PriceLine>,
}

/// The complete order detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailPage {
    pub order_id: String,
    pub order_number: String,
    pub badge: &'static str,
    pub order_placed: String,
    pub total_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
    pub alerts: Vec<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bar: Option<StatusBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingView>,
    pub products: Vec<ProductView>,
    /// Strike through product prices when the order was refunded.
    pub products_line_through: bool,
    pub price_summary: Vec<PriceLine>,
    pub actions: Vec<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_order: Option<OriginalOrderView>,
}

/// Derive the status bundle for an order.
///
/// Copy-on-write over the page state: the template is cloned before any
/// status-specific enrichment, so repeated calls never observe each other's
/// edits.
pub fn detail_status(
    order: &Order,
    status: OrderStatus,
    page: &PageState,
    notify: &dyn Notify,
) -> DetailStatus {
    let tracking_url = if status == OrderStatus::Ordered {
        None
    } else {
        order.tracking_info()
    };

    let mut alerts = page.alerts.clone();
    match status {
        OrderStatus::DeliveryException => {
            let pickup = order
                .tracking_details
                .as_ref()
                .is_some_and(|d| d.status_milestone == MILESTONE_AVAILABLE_FOR_PICKUP);
            if let Some(alert) = alerts.first_mut() {
                let mut anchored = false;
                if let Some(AlertAction::Anchor { label, href }) = alert.action.as_mut() {
                    anchored = true;
                    *href = tracking_url.map(|info| info.url.clone());
                    if pickup {
                        *label = "View location details".to_owned();
                    }
                }
                if anchored && pickup {
                    alert.title = "Available for pickup".to_owned();
                    alert.body = "Your order is being held at a pickup point such as your local \
                                  courier's office. Click on the button below to check location."
                        .to_owned();
                }
            }
        }
        OrderStatus::DeliveryFailure => {
            if let Some(alert) = alerts.first_mut()
                && let Some(AlertAction::Button { on_press, .. }) = alert.action.as_mut()
            {
                *on_press = Some(ButtonBehavior::ContactUs {
                    problem_category: PROBLEM_CATEGORY_NOT_DELIVERED,
                });
            }
        }
        _ => {}
    }

    let mut status_bar = page.status_bar.clone();
    if status == OrderStatus::Delivered
        && let Some(bar) = status_bar.as_mut()
        && order
            .tracking_info_error_message
            .as_deref()
            .is_some_and(|msg| msg.eq_ignore_ascii_case("status not available"))
    {
        // Tracking silently failed for this delivered order; show it as
        // having passed through an exception.
        bar.labels = exception_steps();
        bar.active = 3;
    }

    DetailStatus {
        alerts,
        status_bar,
        tracking: tracking_view(order, tracking_url, notify),
    }
}

fn product_view(item: &LineItem) -> ProductView {
    ProductView {
        id: item.id.clone(),
        name: item.name.clone(),
        quantity: item.current_quantity,
        image: item.image.as_ref().map(Image::thumbnail),
        price: item.discounted_total.as_ref().map(Money::display),
    }
}

fn tracking_view(
    order: &Order,
    tracking_url: Option<&TrackingInfo>,
    notify: &dyn Notify,
) -> Option<TrackingView> {
    let Some(detail) = &order.tracking_details else {
        // No carrier data at all; pass the raw tracking URL through if we
        // have one.
        return tracking_url.map(|info| TrackingView {
            label: None,
            date: None,
            location: None,
            map: None,
            tracking_url: Some(info.clone()),
        });
    };

    let coarse = detail.coarse_status();
    let glance = tracking_glance(
        detail,
        order.shipped_at.as_deref(),
        order.delivered_at.as_deref(),
    );
    let label = glance.label.unwrap_or(tracking_label(coarse));
    let date = glance.date.map(format_day);
    let location = detail
        .last_event
        .as_ref()
        .and_then(|event| event.location.clone());
    let map = detail.last_event.as_ref().and_then(|e| e.geo_coordinates);

    if location.is_none()
        && map.is_none()
        && date.is_none()
        && tracking_url.is_some()
        && !matches!(
            coarse,
            TrackingStatus::DeliveryException | TrackingStatus::DeliveryFailure
        )
    {
        notify.push(Toast::new(TOAST_TRACKING_OUTAGE, TRACKING_OUTAGE_MESSAGE).multiline());
    }

    Some(TrackingView {
        label: Some(label),
        date,
        location,
        map,
        tracking_url: tracking_url.cloned(),
    })
}

/// Compose the full detail page for an order.
///
/// # Errors
///
/// Returns [`UnknownStatusError`] when the order's raw status code is not a
/// known [`OrderStatus`]; the caller reports it and renders nothing.
pub fn detail_page(
    order: &Order,
    merchant: &MerchantConfig,
    notify: &dyn Notify,
) -> Result<OrderDetailPage, UnknownStatusError> {
    let status = OrderStatus::parse(&order.fulfillment_status)
        .ok_or_else(|| UnknownStatusError(order.fulfillment_status.clone()))?;

    let page = PageState::for_status(status, merchant);
    let bundle = detail_status(order, status, &page, notify);

    let mut alerts = bundle.alerts;
    if matches!(
        status,
        OrderStatus::PaymentPending | OrderStatus::OnHold
    ) && let Some(alert) = alerts.first_mut()
        && let Some(AlertAction::Button { on_press, .. }) = alert.action.as_mut()
    {
        *on_press = Some(ButtonBehavior::ViewOriginalOrder);
    }

    if order
        .cancelation_request
        .as_ref()
        .is_some_and(|req| req.is_failed)
        && status != OrderStatus::Delivered
    {
        alerts.push(Alert {
            kind: AlertKind::Error,
            title: "Your order couldn't be canceled".to_owned(),
            body: "The order shipped out a little too fast. Please wait for the order to be \
                   delivered before initiating a return."
                .to_owned(),
            action: None,
            position: Some(AlertPosition::End),
        });
    }

    let refunded = status == OrderStatus::Refunded;
    let strike = |amount: Decimal| refunded && amount > Decimal::ZERO;

    let mut price_summary = Vec::with_capacity(4);
    let discount = &order.current_total_discounts;
    if discount.amount > Decimal::ZERO {
        price_summary.push(PriceLine {
            label: "Discount",
            amount: discount.display_negated(),
            line_through: strike(discount.amount),
            bold: false,
        });
    }
    price_summary.push(PriceLine {
        label: "Shipping",
        amount: order.total_shipping_price.display(),
        line_through: strike(order.total_shipping_price.amount),
        bold: false,
    });
    price_summary.push(PriceLine {
        label: "Taxes",
        amount: order.current_total_tax.display(),
        line_through: strike(order.current_total_tax.amount),
        bold: false,
    });
    let total = if refunded {
        order
            .refunded_price
            .as_ref()
            .unwrap_or(&order.current_total_price)
    } else {
        &order.current_total_price
    };
    price_summary.push(PriceLine {
        label: if refunded { "Amount refunded" } else { "Total" },
        amount: total.display(),
        line_through: false,
        bold: true,
    });

    let products = order.line_items.iter().map(product_view).collect();

    let original_order = order.original_order.as_ref().map(|original| {
        let mut summary = Vec::with_capacity(4);
        if original.current_total_discounts.amount > Decimal::ZERO {
            summary.push(PriceLine {
                label: "Discount",
                amount: original.current_total_discounts.display_negated(),
                line_through: false,
                bold: false,
            });
        }
        summary.push(PriceLine {
            label: "Shipping",
            amount: original.total_shipping_price.display(),
            line_through: false,
            bold: false,
        });
        summary.push(PriceLine {
            label: "Taxes",
            amount: original.current_total_tax.display(),
            line_through: false,
            bold: false,
        });
        summary.push(PriceLine {
            label: "Total",
            amount: original.current_total_price.display(),
            line_through: false,
            bold: true,
        });
        OriginalOrderView {
            products: original.line_items.iter().map(product_view).collect(),
            price_summary: summary,
        }
    });

    Ok(OrderDetailPage {
        order_id: extract_order_id(&order.id).to_owned(),
        order_number: order.name.clone(),
        badge: page.label,
        order_placed: format_day(order.created_at.date_naive()),
        total_price: order.current_total_price.display(),
        shipping_address: order.shipping_address.clone(),
        alerts,
        status_bar: bundle.status_bar,
        tracking: bundle.tracking,
        products,
        products_line_through: refunded,
        price_summary,
        actions: page.actions,
        original_order,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::types::{
        CancelationRequest, Fulfillment, TrackingDetail, TrackingEvent,
    };
    use super::*;
    use crate::notify::ToastBuffer;
    use ordertrail_core::Money;
    use rust_decimal::Decimal;

    fn money(cents: i64) -> Money {
        Money {
            amount: Decimal::new(cents, 2),
            currency_code: "USD".to_owned(),
        }
    }

    fn order(status: &str) -> Order {
        Order {
            id: "gid://shopify/Order/1001".to_owned(),
            name: "#1001".to_owned(),
            created_at: "2024-03-01T00:00:00Z".parse().unwrap(),
            fulfillment_status: status.to_owned(),
            shipped_at: None,
            delivered_at: None,
            fulfillments: Vec::new(),
            shipping_address: None,
            total_shipping_price: money(500),
            current_total_tax: money(320),
            current_total_price: money(4999),
            current_total_discounts: money(0),
            refunded_price: None,
            line_items: Vec::new(),
            cancelation_request: None,
            original_order: None,
            tracking_details: None,
            tracking_info_error_message: None,
        }
    }

    fn with_tracking_url(mut order: Order) -> Order {
        order.fulfillments = vec![Fulfillment {
            tracking_info: vec![TrackingInfo {
                number: "1Z999".to_owned(),
                company: "UPS".to_owned(),
                url: "https://track.example/1Z999".to_owned(),
            }],
        }];
        order
    }

    fn tracking(milestone: &str) -> TrackingDetail {
        TrackingDetail {
            status_milestone: milestone.to_owned(),
            status: None,
            estimated_delivery_date: None,
            delivered_date_time: None,
            last_event: None,
        }
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let buffer = ToastBuffer::new();
        let err = detail_page(&order("WEIRD_STATUS"), &MerchantConfig::default(), &buffer)
            .unwrap_err();
        assert_eq!(err.to_string(), "State \"WEIRD_STATUS\" doesn't exist");
    }

    #[test]
    fn test_delivered_with_tracking_error_shows_exception_bar() {
        let mut delivered = order("DELIVERED");
        delivered.tracking_info_error_message = Some("Status Not Available".to_owned());

        let merchant = MerchantConfig::default();
        let page = PageState::for_status(OrderStatus::Delivered, &merchant);
        let buffer = ToastBuffer::new();
        let bundle = detail_status(&delivered, OrderStatus::Delivered, &page, &buffer);

        let bar = bundle.status_bar.unwrap();
        assert_eq!(bar.labels, exception_steps());
        assert_eq!(bar.active, 3);
    }

    #[test]
    fn test_detail_status_never_mutates_the_page_state() {
        let mut delivered = order("DELIVERED");
        delivered.tracking_info_error_message = Some("status not available".to_owned());

        let merchant = MerchantConfig::default();
        let page = PageState::for_status(OrderStatus::Delivered, &merchant);
        let buffer = ToastBuffer::new();

        let first = detail_status(&delivered, OrderStatus::Delivered, &page, &buffer);
        let second = detail_status(&delivered, OrderStatus::Delivered, &page, &buffer);

        assert_eq!(first, second);
        assert_eq!(page, PageState::for_status(OrderStatus::Delivered, &merchant));
    }

    #[test]
    fn test_exception_alert_links_to_tracking_url() {
        let exception = with_tracking_url(order("DELIVERY_EXCEPTION"));
        let merchant = MerchantConfig::default();
        let page = PageState::for_status(OrderStatus::DeliveryException, &merchant);
        let buffer = ToastBuffer::new();

        let bundle = detail_status(&exception, OrderStatus::DeliveryException, &page, &buffer);
        let alert = &bundle.alerts[0];
        assert_eq!(alert.title, "Delivery exception");
        assert_eq!(
            alert.action,
            Some(AlertAction::Anchor {
                label: "View tracking info".to_owned(),
                href: Some("https://track.example/1Z999".to_owned()),
            })
        );
    }

    #[test]
    fn test_pickup_milestone_rewrites_exception_alert() {
        let mut exception = with_tracking_url(order("DELIVERY_EXCEPTION"));
        exception.tracking_details = Some(tracking("available_for_pickup"));

        let merchant = MerchantConfig::default();
        let page = PageState::for_status(OrderStatus::DeliveryException, &merchant);
        let buffer = ToastBuffer::new();

        let bundle = detail_status(&exception, OrderStatus::DeliveryException, &page, &buffer);
        let alert = &bundle.alerts[0];
        assert_eq!(alert.title, "Available for pickup");
        assert!(matches!(
            &alert.action,
            Some(AlertAction::Anchor { label, .. }) if label == "View location details"
        ));
    }

    #[test]
    fn test_failure_alert_routes_to_contact_us() {
        let failed = order("DELIVERY_FAILURE");
        let merchant = MerchantConfig::default();
        let page = PageState::for_status(OrderStatus::DeliveryFailure, &merchant);
        let buffer = ToastBuffer::new();

        let bundle = detail_status(&failed, OrderStatus::DeliveryFailure, &page, &buffer);
        assert_eq!(
            bundle.alerts[0].action,
            Some(AlertAction::Button {
                label: "Contact us".to_owned(),
                on_press: Some(ButtonBehavior::ContactUs {
                    problem_category: "POST_PURCHASE/DELIVERY/LATE/NOT_DELIVERED",
                }),
            })
        );
    }

    #[test]
    fn test_payment_pending_button_opens_original_order() {
        let buffer = ToastBuffer::new();
        let detail = detail_page(
            &order("PAYMENT_PENDING"),
            &MerchantConfig::default(),
            &buffer,
        )
        .unwrap();
        assert!(matches!(
            &detail.alerts[0].action,
            Some(AlertAction::Button {
                on_press: Some(ButtonBehavior::ViewOriginalOrder),
                ..
            })
        ));
    }

    #[test]
    fn test_failed_cancelation_appends_end_alert() {
        let mut shipped = order("SHIPPED");
        shipped.cancelation_request = Some(CancelationRequest {
            is_failed: true,
            reason: None,
        });

        let buffer = ToastBuffer::new();
        let detail = detail_page(&shipped, &MerchantConfig::default(), &buffer).unwrap();
        let last = detail.alerts.last().unwrap();
        assert_eq!(last.title, "Your order couldn't be canceled");
        assert_eq!(last.position, Some(AlertPosition::End));
        assert_eq!(last.kind, AlertKind::Error);
    }

    #[test]
    fn test_failed_cancelation_silent_once_delivered() {
        let mut delivered = order("DELIVERED");
        delivered.cancelation_request = Some(CancelationRequest {
            is_failed: true,
            reason: None,
        });

        let buffer = ToastBuffer::new();
        let detail = detail_page(&delivered, &MerchantConfig::default(), &buffer).unwrap();
        assert!(detail.alerts.is_empty());
    }

    #[test]
    fn test_refunded_price_summary() {
        let mut refunded = order("REFUNDED");
        refunded.current_total_discounts = money(1000);
        refunded.refunded_price = Some(money(3819));

        let buffer = ToastBuffer::new();
        let detail = detail_page(&refunded, &MerchantConfig::default(), &buffer).unwrap();

        let labels: Vec<&str> = detail.price_summary.iter().map(|row| row.label).collect();
        assert_eq!(labels, vec!["Discount", "Shipping", "Taxes", "Amount refunded"]);

        let discount = &detail.price_summary[0];
        assert_eq!(discount.amount, "-$10.00");
        assert!(discount.line_through);

        let total = detail.price_summary.last().unwrap();
        assert_eq!(total.amount, "$38.19");
        assert!(total.bold);
        assert!(!total.line_through);

        assert!(detail.products_line_through);
    }

    #[test]
    fn test_active_order_price_summary() {
        let buffer = ToastBuffer::new();
        let detail = detail_page(&order("SHIPPED"), &MerchantConfig::default(), &buffer).unwrap();

        let labels: Vec<&str> = detail.price_summary.iter().map(|row| row.label).collect();
        assert_eq!(labels, vec!["Shipping", "Taxes", "Total"]);
        assert!(detail.price_summary.iter().all(|row| !row.line_through));
        assert!(!detail.products_line_through);
    }

    #[test]
    fn test_outage_toast_when_tracking_is_blank() {
        let mut shipped = with_tracking_url(order("SHIPPED"));
        shipped.tracking_details = Some(tracking("in_transit"));

        let buffer = ToastBuffer::new();
        let detail = detail_page(&shipped, &MerchantConfig::default(), &buffer).unwrap();
        assert!(detail.tracking.is_some());

        let toasts = buffer.into_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, TOAST_TRACKING_OUTAGE);
        assert!(toasts[0].multiline);
    }

    #[test]
    fn test_no_outage_toast_for_exception_states() {
        let mut exception = with_tracking_url(order("DELIVERY_EXCEPTION"));
        exception.tracking_details = Some(tracking("exception"));

        let buffer = ToastBuffer::new();
        detail_page(&exception, &MerchantConfig::default(), &buffer).unwrap();
        assert!(buffer.into_toasts().is_empty());
    }

    #[test]
    fn test_no_outage_toast_when_event_data_present() {
        let mut shipped = with_tracking_url(order("SHIPPED"));
        let mut details = tracking("in_transit");
        details.last_event = Some(TrackingEvent {
            occurrence_datetime: "2024-03-02T08:00:00Z".to_owned(),
            location: Some("Memphis, TN".to_owned()),
            geo_coordinates: None,
        });
        shipped.tracking_details = Some(details);

        let buffer = ToastBuffer::new();
        let detail = detail_page(&shipped, &MerchantConfig::default(), &buffer).unwrap();
        assert_eq!(
            detail.tracking.unwrap().location.as_deref(),
            Some("Memphis, TN")
        );
        assert!(buffer.into_toasts().is_empty());
    }

    #[test]
    fn test_ordered_suppresses_tracking_url() {
        let ordered = with_tracking_url(order("ORDERED"));
        let buffer = ToastBuffer::new();
        let detail = detail_page(&ordered, &MerchantConfig::default(), &buffer).unwrap();
        assert!(detail.tracking.is_none());
        assert!(buffer.into_toasts().is_empty());
    }

    #[test]
    fn test_badge_matches_list_label_for_plain_statuses() {
        let buffer = ToastBuffer::new();
        let detail = detail_page(&order("SHIPPED"), &MerchantConfig::default(), &buffer).unwrap();
        assert_eq!(detail.badge, super::super::status::status_label(OrderStatus::Shipped));
    }
}
