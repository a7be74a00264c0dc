//! Static per-status page configuration for the order detail view.
//!
//! Every [`OrderStatus`] has exactly one page state: a badge label, an
//! optional progress bar, default alerts, and the actions offered to the
//! customer. [`PageState::for_status`] is an exhaustive `match`, so a new
//! status variant cannot ship without a page state.
//!
//! Page states are built fresh on every call. Derivation downstream is free
//! to modify the returned value; there is no shared template to
//! cross-contaminate between renders.

use ordertrail_core::OrderStatus;
use serde::Serialize;

use crate::config::MerchantConfig;

/// Progress bar step indices.
pub const STEP_ORDERED: usize = 0;
pub const STEP_SHIPPED: usize = 1;
pub const STEP_DELIVERED: usize = 2;
pub const STEP_EXCEPTION: usize = 2;
pub const STEP_FAILED: usize = 3;

/// Default three-step progress labels.
#[must_use]
pub fn default_steps() -> Vec<&'static str> {
    vec!["Ordered", "Shipped", "Delivered"]
}

/// Four-step labels for orders that passed through an exception.
#[must_use]
pub fn exception_steps() -> Vec<&'static str> {
    vec!["Ordered", "Shipped", "Exception", "Delivered"]
}

/// Four-step labels for failed deliveries.
#[must_use]
pub fn failed_steps() -> Vec<&'static str> {
    vec!["Ordered", "Shipped", "Exception", "Failed"]
}

/// Progress bar specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBar {
    pub labels: Vec<&'static str>,
    pub active: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_color: Option<BarColor>,
}

/// Progress bar accent color for non-nominal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Yellow,
    Red,
}

/// Severity of an alert banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Warning,
    Error,
}

/// Placement hint for alerts appended outside the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPosition {
    End,
}

/// An alert banner on the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AlertAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AlertPosition>,
}

/// The interactive element attached to an alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AlertAction {
    Button {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        on_press: Option<ButtonBehavior>,
    },
    Anchor {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        href: Option<String>,
    },
}

/// What pressing an alert button does on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ButtonBehavior {
    /// Open the original-order comparison sheet.
    ViewOriginalOrder,
    /// Open the contact-us flow with a preselected problem category.
    ContactUs { problem_category: &'static str },
}

/// A navigation action offered to the customer on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub label: &'static str,
    /// Route target, relative to the order detail page.
    pub to: &'static str,
    /// Analytics event tag fired on navigation.
    pub event_type: &'static str,
}

/// Static page configuration for one order status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bar: Option<StatusBar>,
    pub alerts: Vec<Alert>,
    pub actions: Vec<Action>,
}

// =============================================================================
// Actions
// =============================================================================

const WHERE_IS_MY_ORDER: Action = Action {
    label: "Where is my order",
    to: "tracking",
    event_type: "WHERE_IS_MY_ORDER",
};

const CHANGE_SHIPPING_ADDRESS: Action = Action {
    label: "Change shipping address",
    to: "change-shipping-address",
    event_type: "CHANGE_SHIPPING_ADDRESS",
};

const WRONG_SHIPPING_ADDRESS: Action = Action {
    label: "My shipping address is wrong",
    to: "contact-us-wrong-address",
    event_type: "WRONG_SHIPPING_ADDRESS",
};

const DEFECTIVE_ITEMS: Action = Action {
    label: "My item(s) is defective",
    to: "defective",
    event_type: "DEFECTIVE_ITEMS",
};

const MISSING_ITEMS: Action = Action {
    label: "My order arrived but some items are missing",
    to: "missing",
    event_type: "MISSING_ITEMS",
};

const CHANGE_VARIANT: Action = Action {
    label: "Ordered the wrong size / color",
    to: "edit-order",
    event_type: "CHANGE_VARIANT",
};

const CANCEL_ORDER: Action = Action {
    label: "I want to cancel my order",
    to: "cancel",
    event_type: "CANCEL_ORDER",
};

/// The return action; label depends on whether the merchant offers
/// exchanges.
const fn return_items(merchant: &MerchantConfig) -> Action {
    Action {
        label: if merchant.offers_exchanges {
            "Return / Exchange item(s)"
        } else {
            "Return item(s)"
        },
        to: "return-exchange",
        event_type: "RETURN_ITEMS",
    }
}

/// Actions for delivered orders. Exchange merchants lead with the return
/// entry.
fn delivered_actions(merchant: &MerchantConfig) -> Vec<Action> {
    if merchant.offers_exchanges {
        vec![
            WHERE_IS_MY_ORDER,
            return_items(merchant),
            MISSING_ITEMS,
            DEFECTIVE_ITEMS,
        ]
    } else {
        vec![
            WHERE_IS_MY_ORDER,
            DEFECTIVE_ITEMS,
            MISSING_ITEMS,
            return_items(merchant),
        ]
    }
}

// =============================================================================
// Page states
// =============================================================================

impl PageState {
    /// Build the page state for an order status.
    ///
    /// Returns a fresh value each call so downstream enrichment can never
    /// leak into another render.
    #[must_use]
    pub fn for_status(status: OrderStatus, merchant: &MerchantConfig) -> Self {
        match status {
            OrderStatus::Ordered => Self {
                label: "Ordered",
                status_bar: Some(StatusBar {
                    labels: default_steps(),
                    active: STEP_ORDERED,
                    bar_color: None,
                }),
                alerts: Vec::new(),
                actions: vec![
                    WHERE_IS_MY_ORDER,
                    CHANGE_SHIPPING_ADDRESS,
                    CHANGE_VARIANT,
                    CANCEL_ORDER,
                ],
            },
            OrderStatus::Shipped => Self {
                label: "Shipped",
                status_bar: Some(StatusBar {
                    labels: default_steps(),
                    active: STEP_SHIPPED,
                    bar_color: None,
                }),
                alerts: Vec::new(),
                actions: vec![WHERE_IS_MY_ORDER, WRONG_SHIPPING_ADDRESS],
            },
            OrderStatus::Delivered => Self {
                label: "Delivered",
                status_bar: Some(StatusBar {
                    labels: default_steps(),
                    active: STEP_DELIVERED,
                    bar_color: None,
                }),
                alerts: Vec::new(),
                actions: delivered_actions(merchant),
            },
            OrderStatus::Refunded => Self {
                label: "Refunded",
                status_bar: None,
                alerts: vec![Alert {
                    kind: AlertKind::Success,
                    title: "Order canceled".to_string(),
                    body: "We have processed your refund. Please check your original method of \
                           payment."
                        .to_string(),
                    action: None,
                    position: None,
                }],
                actions: Vec::new(),
            },
            OrderStatus::CancelationRequested => Self {
                label: "Cancelation requested",
                status_bar: Some(StatusBar {
                    labels: default_steps(),
                    active: STEP_ORDERED,
                    bar_color: None,
                }),
                alerts: Vec::new(),
                actions: vec![WHERE_IS_MY_ORDER, CHANGE_SHIPPING_ADDRESS],
            },
            OrderStatus::PaymentPending => Self {
                label: "Pending payment",
                status_bar: None,
                alerts: vec![Alert {
                    kind: AlertKind::Warning,
                    title: "Pending payment".to_string(),
                    body: "You have edited your order to include an item that is more expensive \
                           than what you initially ordered.\n\nMake payment within 3 days or \
                           your order will be canceled and refunded."
                        .to_string(),
                    action: Some(AlertAction::Button {
                        label: "View original order".to_string(),
                        on_press: None,
                    }),
                    position: None,
                }],
                actions: vec![
                    WHERE_IS_MY_ORDER,
                    CHANGE_SHIPPING_ADDRESS,
                    CHANGE_VARIANT,
                    CANCEL_ORDER,
                ],
            },
            OrderStatus::OnHold => Self {
                label: "On hold",
                status_bar: None,
                alerts: vec![Alert {
                    kind: AlertKind::Warning,
                    title: "Order placed on hold".to_string(),
                    body: "The top-up payment wasn't completed for the item you added, which is \
                           more expensive that what you initially ordered.\n\nA support agent \
                           will contact you within 2 business days (excluding weekends and \
                           holidays) with next steps."
                        .to_string(),
                    action: Some(AlertAction::Button {
                        label: "View original order".to_string(),
                        on_press: None,
                    }),
                    position: None,
                }],
                actions: vec![WHERE_IS_MY_ORDER, CHANGE_SHIPPING_ADDRESS, CANCEL_ORDER],
            },
            OrderStatus::DeliveryException => Self {
                label: "Delivered",
                status_bar: Some(StatusBar {
                    labels: exception_steps(),
                    active: STEP_EXCEPTION,
                    bar_color: Some(BarColor::Yellow),
                }),
                alerts: vec![Alert {
                    kind: AlertKind::Warning,
                    title: "Delivery exception".to_string(),
                    body: "The courier was unable to deliver this order. Check to see if they \
                           missed you and left a note."
                        .to_string(),
                    action: Some(AlertAction::Anchor {
                        label: "View tracking info".to_string(),
                        href: None,
                    }),
                    position: None,
                }],
                actions: vec![WHERE_IS_MY_ORDER, WRONG_SHIPPING_ADDRESS],
            },
            OrderStatus::DeliveryFailure => Self {
                label: "Delivered",
                status_bar: Some(StatusBar {
                    labels: failed_steps(),
                    active: STEP_FAILED,
                    bar_color: Some(BarColor::Red),
                }),
                alerts: vec![Alert {
                    kind: AlertKind::Error,
                    title: "Delivery failed".to_string(),
                    body: "Your order is being returned to sender. Click on the button below to \
                           get more help."
                        .to_string(),
                    action: Some(AlertAction::Button {
                        label: "Contact us".to_string(),
                        on_press: None,
                    }),
                    position: None,
                }],
                actions: vec![WHERE_IS_MY_ORDER],
            },
        }
    }
}
