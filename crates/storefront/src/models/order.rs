//! Order models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use merchstand_core::{Email, OrderId, OrderStatus, ProductId, line_total};

/// A placed order, as stored in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    /// The normalized email the order is linked to for history lookups.
    pub email: Email,
    #[serde(default)]
    pub full_name: String,
    pub shipping: ShippingDetails,
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
    #[serde(default)]
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The shipping destination captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// One purchased line, snapshotted from the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image: String,
}

const fn default_quantity() -> u32 {
    1
}

fn default_size() -> String {
    "N/A".to_owned()
}

impl OrderItem {
    /// The extended price of this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}

impl From<crate::models::CartItem> for OrderItem {
    fn from(item: crate::models::CartItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            size: item.size,
            color: item.color,
            image: item.image,
        }
    }
}

/// The money breakdown of an order.
///
/// `tax` is rounded before `total` is computed; the stored fields are
/// exactly the amounts shown to the customer at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Aggregate order history figures for one customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatistics {
    pub total_orders: usize,
    pub total_spent: Decimal,
    pub average_order_value: Decimal,
    /// Count per status; every status is present, zero or not.
    pub status_counts: BTreeMap<OrderStatus, usize>,
}
