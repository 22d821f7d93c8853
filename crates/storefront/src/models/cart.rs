//! Cart line items.

use serde::{Deserialize, Serialize};

use brightbuy_core::ProductId;

/// One product line in a user's cart.
///
/// A cart holds at most one entry per product; the quantity is always at
/// least 1 once written through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product in the catalog.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart line.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Total number of units across a cart, as shown on the cart badge.
#[must_use]
pub fn item_count(cart: &[CartItem]) -> u32 {
    cart.iter().fold(0_u32, |total, item| total.saturating_add(item.quantity))
}
