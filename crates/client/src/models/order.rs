//! Order types: the placement request and the backend's order resource.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bramblefig_core::{OrderId, PaymentMethod, ProductId};

/// One purchased line inside an order.
///
/// Snapshotted from the cart at placement time - the name, image, and price
/// are the values the customer saw, independent of later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Id of the purchased product.
    pub product: ProductId,
    pub name: String,
    pub qty: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
}

/// Shipping destination captured by the checkout flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Request body for `POST orders/add/`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// The user an order belongs to, as embedded in the order resource.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// An order as served by the order endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub user: Option<OrderUser>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub shipping_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_draft_wire_shape() {
        let draft = OrderDraft {
            order_items: vec![OrderItem {
                product: ProductId::new("p1"),
                name: "Mug".to_owned(),
                qty: 2,
                price: Decimal::new(850, 2),
                image: "/images/mug.jpg".to_owned(),
            }],
            shipping_address: ShippingAddress {
                address: "1 Fig Lane".to_owned(),
                city: "Portland".to_owned(),
                postal_code: "97201".to_owned(),
                country: "USA".to_owned(),
            },
            payment_method: PaymentMethod::PayPal,
            tax_price: Decimal::new(255, 2),
            shipping_price: Decimal::from(10),
            total_price: Decimal::new(2955, 2),
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("orderItems").is_some());
        assert!(value.get("shippingAddress").is_some());
        assert_eq!(value["paymentMethod"], "PayPal");
        assert_eq!(value["shippingAddress"]["postalCode"], "97201");
        assert_eq!(value["taxPrice"], 2.55);
    }

    #[test]
    fn test_order_deserializes_minimal_resource() {
        // The list endpoint returns a trimmed resource.
        let json = r#"{"_id": "o-9", "totalPrice": 38.75, "isPaid": false, "isDelivered": false}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.as_str(), "o-9");
        assert_eq!(order.total_price, Decimal::new(3875, 2));
        assert!(!order.is_paid);
        assert!(order.paid_at.is_none());
        assert!(order.order_items.is_empty());
    }

    #[test]
    fn test_order_deserializes_full_resource() {
        let json = r#"{
            "_id": "o-1",
            "user": {"email": "fern@example.com", "name": "Fern"},
            "orderItems": [
                {"product": "p1", "name": "Mug", "qty": 2, "price": 8.5, "image": "/i.jpg"}
            ],
            "shippingAddress": {
                "address": "1 Fig Lane", "city": "Portland",
                "postalCode": "97201", "country": "USA"
            },
            "paymentMethod": "CreditCard",
            "taxPrice": 2.55,
            "shippingPrice": 10,
            "totalPrice": 29.55,
            "isPaid": true,
            "paidAt": "2026-03-01T12:00:00Z",
            "isDelivered": false
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.payment_method, Some(PaymentMethod::CreditCard));
        assert_eq!(order.user.unwrap().email, "fern@example.com");
        assert_eq!(order.order_items.len(), 1);
        assert!(order.paid_at.is_some());
    }
}
