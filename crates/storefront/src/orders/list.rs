//! Order list view-model derivation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::status::list_status;
use super::types::{extract_order_id, Image, OrderSummary};

/// One card on the order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCard {
    pub order_id: String,
    pub name: String,
    /// One-line status, e.g. "Shipped Mar 1, 2024". Empty for unknown
    /// status codes.
    pub status: String,
    pub total_price: String,
    pub order_placed: DateTime<Utc>,
    /// Thumbnail URLs for the order's line items, skipping items without
    /// an image.
    pub images: Vec<String>,
}

impl OrderCard {
    fn from_summary(order: &OrderSummary) -> Self {
        Self {
            order_id: extract_order_id(&order.id).to_owned(),
            name: order.name.clone(),
            status: list_status(order),
            total_price: order.current_total_price.display(),
            order_placed: order.created_at,
            images: order
                .line_items
                .iter()
                .filter_map(|item| item.image.as_ref().map(Image::thumbnail))
                .collect(),
        }
    }
}

/// Build the order list, most recently placed first.
#[must_use]
pub fn order_cards(orders: &[OrderSummary]) -> Vec<OrderCard> {
    let mut cards: Vec<OrderCard> = orders.iter().map(OrderCard::from_summary).collect();
    cards.sort_by(|a, b| b.order_placed.cmp(&a.order_placed));
    cards
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::types::LineItem;
    use super::*;
    use ordertrail_core::Money;
    use rust_decimal::Decimal;

    fn summary(id: u64, created_at: &str) -> OrderSummary {
        OrderSummary {
            id: format!("gid://shopify/Order/{id}"),
            name: format!("#{id}"),
            created_at: created_at.parse().unwrap(),
            fulfillment_status: "ORDERED".to_owned(),
            shipped_at: None,
            delivered_at: None,
            current_total_price: Money {
                amount: Decimal::new(4999, 2),
                currency_code: "USD".to_owned(),
            },
            line_items: Vec::new(),
            tracking_details: None,
        }
    }

    #[test]
    fn test_orders_sort_newest_first() {
        let orders = vec![
            summary(1, "2024-01-01T00:00:00Z"),
            summary(2, "2024-03-01T00:00:00Z"),
            summary(3, "2024-02-01T00:00:00Z"),
        ];

        let cards = order_cards(&orders);
        let ids: Vec<&str> = cards.iter().map(|card| card.order_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_card_fields() {
        let mut order = summary(1001, "2024-03-01T00:00:00Z");
        order.line_items = vec![
            LineItem {
                id: "li-1".to_owned(),
                name: "Mug".to_owned(),
                image: Some(Image {
                    url: "https://cdn.example/mug.jpg".to_owned(),
                }),
                current_quantity: 1,
                discounted_total: None,
            },
            LineItem {
                id: "li-2".to_owned(),
                name: "Gift note".to_owned(),
                image: None,
                current_quantity: 1,
                discounted_total: None,
            },
        ];

        let cards = order_cards(&[order]);
        let card = &cards[0];
        assert_eq!(card.order_id, "1001");
        assert_eq!(card.name, "#1001");
        assert_eq!(card.status, "Ordered");
        assert_eq!(card.total_price, "$49.99");
        assert_eq!(card.images, vec!["https://cdn.example/mug.jpg?width=80"]);
    }
}
