//! Sale order records and the order creation payload.
//!
//! Orders are created and owned by the Odoo backend; the storefront only
//! submits a checkout request and renders what comes back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::{AddressId, OrderId, OrderState, PartnerId, ProductId};

/// A shipping or billing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AddressId>,
    /// Recipient name.
    pub name: String,
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    #[serde(default)]
    pub is_default: bool,
}

/// One line of a sale order, as recorded by Odoo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at order time.
    pub price_unit: Decimal,
    pub subtotal: Decimal,
}

/// A sale order created from a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Order reference (e.g., "SO-2024-001").
    pub name: String,
    pub date_order: DateTime<Utc>,
    pub state: OrderState,
    pub partner_id: PartnerId,
    pub partner_name: String,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub order_lines: Vec<OrderLine>,
    pub amount_untaxed: Decimal,
    pub amount_tax: Decimal,
    pub amount_total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload submitted to the order service at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// The cart being converted into an order. Should be synced first.
    pub cart: Cart,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            id: Some(AddressId::new(1)),
            name: "Home".to_string(),
            street: "123 Main Street".to_string(),
            street2: None,
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip: "10001".to_string(),
            country: "United States".to_string(),
            phone: "+1 555-123-4567".to_string(),
            is_default: true,
        }
    }

    #[test]
    fn test_order_serde_roundtrip() {
        let order = Order {
            id: OrderId::new(1),
            name: "SO-2024-001".to_string(),
            date_order: "2024-01-15T10:30:00Z".parse().expect("timestamp"),
            state: OrderState::Done,
            partner_id: PartnerId::new(1),
            partner_name: "John Smith".to_string(),
            shipping_address: address(),
            billing_address: address(),
            order_lines: vec![OrderLine {
                product_id: ProductId::new(1),
                product_name: "Organic Bananas".to_string(),
                quantity: 2,
                price_unit: Decimal::new(299, 2),
                subtotal: Decimal::new(598, 2),
            }],
            amount_untaxed: Decimal::new(598, 2),
            amount_tax: Decimal::new(48, 2),
            amount_total: Decimal::new(646, 2),
            payment_method: Some("Cash on Delivery".to_string()),
            notes: None,
        };
        let json = serde_json::to_string(&order).expect("serialize");
        let back: Order = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, order);
    }
}
