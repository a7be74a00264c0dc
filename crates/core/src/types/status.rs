//! Status enums for orders and carrier tracking.

use serde::{Deserialize, Serialize};

/// Order lifecycle status assigned by the merchant backend.
///
/// This is the primary dispatch key for all status presentation logic.
/// Order records carry the status as a free-form string on the wire; use
/// [`OrderStatus::parse`] to map it into the closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Ordered,
    Shipped,
    Delivered,
    Refunded,
    CancelationRequested,
    PaymentPending,
    OnHold,
    DeliveryException,
    DeliveryFailure,
}

impl OrderStatus {
    /// All statuses, for exhaustiveness checks in tests and seed tooling.
    pub const ALL: [Self; 9] = [
        Self::Ordered,
        Self::Shipped,
        Self::Delivered,
        Self::Refunded,
        Self::CancelationRequested,
        Self::PaymentPending,
        Self::OnHold,
        Self::DeliveryException,
        Self::DeliveryFailure,
    ];

    /// Parse a raw status code from an order record.
    ///
    /// Returns `None` for codes outside the known enumeration; how that is
    /// handled (silent empty label vs. error report) is the caller's call.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "ORDERED" => Some(Self::Ordered),
            "SHIPPED" => Some(Self::Shipped),
            "DELIVERED" => Some(Self::Delivered),
            "REFUNDED" => Some(Self::Refunded),
            "CANCELATION_REQUESTED" => Some(Self::CancelationRequested),
            "PAYMENT_PENDING" => Some(Self::PaymentPending),
            "ON_HOLD" => Some(Self::OnHold),
            "DELIVERY_EXCEPTION" => Some(Self::DeliveryException),
            "DELIVERY_FAILURE" => Some(Self::DeliveryFailure),
            _ => None,
        }
    }

    /// The wire form of the status (SCREAMING_SNAKE_CASE).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ordered => "ORDERED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Refunded => "REFUNDED",
            Self::CancelationRequested => "CANCELATION_REQUESTED",
            Self::PaymentPending => "PAYMENT_PENDING",
            Self::OnHold => "ON_HOLD",
            Self::DeliveryException => "DELIVERY_EXCEPTION",
            Self::DeliveryFailure => "DELIVERY_FAILURE",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid order status: {s}"))
    }
}

/// Coarse carrier-tracking status, distinct from the order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingStatus {
    Delivered,
    Shipped,
    DeliveryException,
    DeliveryFailure,
}

impl TrackingStatus {
    /// Map a carrier status milestone to the coarse tracking status.
    ///
    /// Milestones follow the carrier aggregator's vocabulary
    /// (<https://docs.ship24.com/status/>). Unrecognized milestones fall
    /// back to `Shipped`, matching the backend's behavior.
    #[must_use]
    pub fn from_milestone(milestone: &str) -> Self {
        match milestone {
            "delivered" => Self::Delivered,
            "failed_attempt" | "available_for_pickup" => Self::DeliveryException,
            "exception" => Self::DeliveryFailure,
            _ => Self::Shipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_statuses_roundtrip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_parse_unknown_status() {
        assert_eq!(OrderStatus::parse("WEIRD_STATUS"), None);
        assert_eq!(OrderStatus::parse(""), None);
        // Parsing is case-sensitive, like the backend's status codes.
        assert_eq!(OrderStatus::parse("shipped"), None);
    }

    #[test]
    fn test_from_str_error_message() {
        let err = "BOGUS".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err, "invalid order status: BOGUS");
    }

    #[test]
    fn test_serde_wire_form() {
        let json = serde_json::to_string(&OrderStatus::CancelationRequested).unwrap();
        assert_eq!(json, "\"CANCELATION_REQUESTED\"");
        let status: TrackingStatus = serde_json::from_str("\"DELIVERY_EXCEPTION\"").unwrap();
        assert_eq!(status, TrackingStatus::DeliveryException);
    }

    #[test]
    fn test_milestone_mapping() {
        assert_eq!(
            TrackingStatus::from_milestone("pending"),
            TrackingStatus::Shipped
        );
        assert_eq!(
            TrackingStatus::from_milestone("info_received"),
            TrackingStatus::Shipped
        );
        assert_eq!(
            TrackingStatus::from_milestone("in_transit"),
            TrackingStatus::Shipped
        );
        assert_eq!(
            TrackingStatus::from_milestone("out_for_delivery"),
            TrackingStatus::Shipped
        );
        assert_eq!(
            TrackingStatus::from_milestone("failed_attempt"),
            TrackingStatus::DeliveryException
        );
        assert_eq!(
            TrackingStatus::from_milestone("available_for_pickup"),
            TrackingStatus::DeliveryException
        );
        assert_eq!(
            TrackingStatus::from_milestone("delivered"),
            TrackingStatus::Delivered
        );
        assert_eq!(
            TrackingStatus::from_milestone("exception"),
            TrackingStatus::DeliveryFailure
        );
    }

    #[test]
    fn test_unknown_milestone_defaults_to_shipped() {
        assert_eq!(
            TrackingStatus::from_milestone("teleported"),
            TrackingStatus::Shipped
        );
    }
}
