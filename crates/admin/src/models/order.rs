//! Order domain types.
//!
//! Orders are created by the storefront at checkout; this API only reads
//! them and moves their status. The `products` and `shipping_info` columns
//! are JSONB snapshots taken at purchase time and are intentionally
//! independent of the live catalog and customer records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use boutique_core::{OrderId, OrderStatus, UserId};

/// Shipping details captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
    /// Delivery zone used for shipping pricing and reporting.
    #[serde(default)]
    pub delivery: Option<String>,
    /// Free-form note from the customer.
    #[serde(default)]
    pub message: Option<String>,
    /// Contact phone at delivery time.
    pub phone: String,
    /// Recipient first name.
    pub firstname: String,
    /// Recipient last name.
    pub lastname: String,
    /// Contact email.
    pub email: String,
    /// Secondary postal code field kept for checkout compatibility.
    #[serde(default)]
    pub zip: Option<String>,
}

/// An order as stored.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Human-facing order number.
    pub order_number: String,
    /// Customer who placed the order. Cleared when the account is deleted.
    pub user_id: Option<UserId>,
    /// Line-item snapshot from the cart at purchase time.
    pub products: Json<serde_json::Value>,
    /// Shipping details snapshot.
    pub shipping_info: Json<ShippingInfo>,
    /// Shipping cost at checkout.
    pub shipping_cost: Decimal,
    /// Grand total computed at checkout; never recomputed here.
    pub total: Decimal,
    /// Payment method label.
    pub payment_method: String,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last touched.
    pub updated_at: DateTime<Utc>,
}

/// Basic customer fields populated onto order responses.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCustomer {
    /// Customer first name.
    pub firstname: String,
    /// Customer last name.
    pub lastname: String,
    /// Customer email.
    pub email: String,
}

/// An order joined with its customer's basic fields.
///
/// The customer is `None` when the account was deleted after the order was
/// placed; the shipping snapshot still carries the historical contact data.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithCustomer {
    /// The order itself.
    #[serde(flatten)]
    pub order: Order,
    /// Populated customer fields.
    pub user: Option<OrderCustomer>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shipping(delivery: Option<&str>) -> ShippingInfo {
        ShippingInfo {
            address: "12 Rue des Manguiers".to_owned(),
            city: "Dakar".to_owned(),
            postal_code: "10200".to_owned(),
            country: "Senegal".to_owned(),
            delivery: delivery.map(str::to_owned),
            message: None,
            phone: "+221771234567".to_owned(),
            firstname: "Awa".to_owned(),
            lastname: "Diop".to_owned(),
            email: "awa@example.com".to_owned(),
            zip: None,
        }
    }

    fn order() -> Order {
        Order {
            id: OrderId::new(9),
            order_number: "CMD-2026-0009".to_owned(),
            user_id: Some(UserId::new(1)),
            products: Json(serde_json::json!([{ "title": "Shea butter", "qty": 2 }])),
            shipping_info: Json(shipping(Some("dakar-plateau"))),
            shipping_cost: Decimal::new(2000, 0),
            total: Decimal::new(11000, 0),
            payment_method: "cash_on_delivery".to_owned(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let json = serde_json::to_value(order()).unwrap();
        assert_eq!(json["orderNumber"], "CMD-2026-0009");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["shippingInfo"]["postalCode"], "10200");
    }

    #[test]
    fn test_order_with_customer_flattens() {
        let with_customer = OrderWithCustomer {
            order: order(),
            user: Some(OrderCustomer {
                firstname: "Awa".to_owned(),
                lastname: "Diop".to_owned(),
                email: "awa@example.com".to_owned(),
            }),
        };
        let json = serde_json::to_value(&with_customer).unwrap();
        assert_eq!(json["orderNumber"], "CMD-2026-0009");
        assert_eq!(json["user"]["firstname"], "Awa");
    }

    #[test]
    fn test_shipping_info_tolerates_missing_optionals() {
        let json = serde_json::json!({
            "address": "12 Rue des Manguiers",
            "city": "Dakar",
            "postalCode": "10200",
            "country": "Senegal",
            "phone": "+221771234567",
            "firstname": "Awa",
            "lastname": "Diop",
            "email": "awa@example.com"
        });
        let parsed: ShippingInfo = serde_json::from_value(json).unwrap();
        assert!(parsed.delivery.is_none());
        assert!(parsed.message.is_none());
    }
}
