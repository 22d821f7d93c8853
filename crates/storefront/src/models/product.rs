//! Catalog product type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use brightbuy_core::ProductId;

/// A purchasable product from the static catalog.
///
/// Products are reference data: the store never persists them, and orders
/// copy the fields they need at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Current selling price.
    pub price: Decimal,
    /// Price before discount, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub category: String,
    /// Average review score out of 5.
    pub rating: f32,
    /// Number of reviews.
    pub reviews: u32,
    pub in_stock: bool,
    /// Shown on the home page.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Whole-percent discount off `original_price`, if on sale.
    #[must_use]
    pub fn discount_percent(&self) -> Option<Decimal> {
        let original = self.original_price?;
        if original <= self.price || original.is_zero() {
            return None;
        }
        Some(((original - self.price) / original * Decimal::ONE_HUNDRED).round())
    }
}
