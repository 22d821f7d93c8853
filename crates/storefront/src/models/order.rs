//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use brightbuy_core::{OrderId, OrderStatus, ProductId, UserId};

/// A placed order.
///
/// `items` is a frozen copy of product data at purchase time and `total` is
/// computed once at checkout; neither is recalculated afterward. Only
/// `status` changes over an order's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer who placed the order.
    pub user_id: UserId,
    /// Purchased lines.
    pub items: Vec<OrderItem>,
    /// Amount charged, including shipping and tax.
    pub total: Decimal,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Single-line shipping address.
    pub shipping_address: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |total, item| total.saturating_add(item.quantity))
    }
}

/// Snapshot of one purchased product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    /// Product name at purchase time.
    pub name: String,
    /// Unit price at purchase time.
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Order {
        Order {
            id: OrderId::new("1718000000000"),
            user_id: UserId::new("user-1"),
            items: vec![
                OrderItem {
                    product_id: ProductId::new("1"),
                    name: "Wireless Noise-Cancelling Headphones".to_owned(),
                    price: Decimal::new(29999, 2),
                    quantity: 2,
                },
                OrderItem {
                    product_id: ProductId::new("10"),
                    name: "Car Phone Mount".to_owned(),
                    price: Decimal::new(1999, 2),
                    quantity: 1,
                },
            ],
            total: Decimal::new(66957, 2),
            status: OrderStatus::Pending,
            shipping_address: "1 Loop Rd, Springfield, 12345".to_owned(),
            created_at: "2024-06-10T12:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_item_count_and_line_total() {
        let order = sample();
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.items[0].line_total(), Decimal::new(59998, 2));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["shippingAddress"], "1 Loop Rd, Springfield, 12345");
        assert_eq!(json["items"][0]["productId"], "1");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_reads_numeric_money_from_older_blobs() {
        let raw = r#"{
            "id": "1",
            "userId": "user-1",
            "items": [{"productId": "7", "name": "Yoga Mat with Carrying Strap", "price": 34.99, "quantity": 1}],
            "total": 47.7692,
            "status": "shipped",
            "shippingAddress": "a, b, c",
            "createdAt": "2024-06-10T12:00:00.000Z"
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.items[0].price, Decimal::new(3499, 2));
        assert_eq!(order.total, Decimal::new(477_692, 4));
        assert_eq!(order.status, OrderStatus::Shipped);
    }
}
