//! Cart commands for the signed-in user.

use tracing::info;

use brightbuy_core::{Price, ProductId};
use brightbuy_storefront::error::{AppError, Result};
use brightbuy_storefront::services::CheckoutService;
use brightbuy_storefront::{Catalog, DomainStore, KeyValueStorage, PricingConfig};

use super::require_user;

/// Show cart lines with the checkout price breakdown.
pub fn show<S: KeyValueStorage>(store: &DomainStore<S>, pricing: &PricingConfig) -> Result<()> {
    let user = require_user(store)?;
    let summary = CheckoutService::new(store, Catalog::builtin(), *pricing).cart_summary(&user.id)?;

    if summary.is_empty() {
        info!("Your cart is empty");
        return Ok(());
    }

    for line in &summary.lines {
        info!(
            "[{}] {} x{} @ {} = {}",
            line.product.id,
            line.product.name,
            line.quantity,
            Price::usd(line.product.price),
            Price::usd(line.line_total())
        );
    }

    let totals = summary.totals;
    info!("Items:    {}", summary.item_count);
    info!("Subtotal: {}", Price::usd(totals.subtotal));
    if totals.shipping.is_zero() {
        info!("Shipping: FREE");
    } else {
        info!("Shipping: {}", Price::usd(totals.shipping));
    }
    info!("Tax:      {}", Price::usd(totals.tax));
    info!("Total:    {}", Price::usd(totals.total));
    Ok(())
}

pub fn add<S: KeyValueStorage>(
    store: &DomainStore<S>,
    product_id: &str,
    quantity: u32,
) -> Result<()> {
    let user = require_user(store)?;
    let product_id = ProductId::new(product_id);
    let product = Catalog::builtin()
        .get(&product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    store.add_to_cart(&user.id, &product_id, quantity)?;
    info!("{} added to cart!", product.name);
    Ok(())
}

pub fn update<S: KeyValueStorage>(
    store: &DomainStore<S>,
    product_id: &str,
    quantity: u32,
) -> Result<()> {
    let user = require_user(store)?;
    let product_id = ProductId::new(product_id);

    if !store.update_cart_quantity(&user.id, &product_id, quantity)? {
        return Err(AppError::NotFound(format!("product {product_id} in cart")));
    }
    info!("Quantity updated");
    Ok(())
}

pub fn remove<S: KeyValueStorage>(store: &DomainStore<S>, product_id: &str) -> Result<()> {
    let user = require_user(store)?;
    let product_id = ProductId::new(product_id);

    if !store.remove_from_cart(&user.id, &product_id)? {
        return Err(AppError::NotFound(format!("product {product_id} in cart")));
    }
    info!("Removed from cart");
    Ok(())
}

pub fn clear<S: KeyValueStorage>(store: &DomainStore<S>) -> Result<()> {
    let user = require_user(store)?;
    store.clear_cart(&user.id)?;
    info!("Cart cleared");
    Ok(())
}
