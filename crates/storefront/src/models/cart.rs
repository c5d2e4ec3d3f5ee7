//! Cart models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use merchstand_core::{CartItemId, ProductId, line_total};

/// One line in the cart.
///
/// Each line snapshots the product's name, price, and image at the time
/// it was added, so later catalog changes do not rewrite carts. Two
/// lines for the same product are allowed (different size or color).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    pub size: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub color: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

impl CartItem {
    /// The extended price of this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}
