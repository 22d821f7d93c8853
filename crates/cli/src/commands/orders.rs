//! Checkout, order history and notifications.

use tracing::info;

use brightbuy_core::{NotificationId, Price};
use brightbuy_storefront::error::{AppError, Result};
use brightbuy_storefront::services::{
    CheckoutRequest, CheckoutService, PaymentDetails, ShippingDetails,
};
use brightbuy_storefront::{Catalog, DomainStore, KeyValueStorage, PricingConfig};

use super::require_user;

/// Checkout flags. Unset name, email, address and phone fall back to the
/// account's details.
#[derive(Debug, Default)]
pub struct CheckoutForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub zip: String,
    pub phone: Option<String>,
    pub card: String,
    pub expiry: String,
    pub cvv: String,
}

pub fn checkout<S: KeyValueStorage>(
    store: &DomainStore<S>,
    pricing: &PricingConfig,
    form: CheckoutForm,
) -> Result<()> {
    let user = require_user(store)?;

    let prefill = ShippingDetails::from_user(user);
    let request = CheckoutRequest {
        shipping: ShippingDetails {
            name: form.name.unwrap_or(prefill.name),
            email: form.email.unwrap_or(prefill.email),
            address: form.address.unwrap_or(prefill.address),
            city: form.city,
            zip_code: form.zip,
            phone: form.phone.unwrap_or(prefill.phone),
        },
        payment: PaymentDetails {
            card_number: form.card,
            expiry: form.expiry,
            cvv: form.cvv,
        },
    };

    let order =
        CheckoutService::new(store, Catalog::builtin(), *pricing).place_order(&user.id, &request)?;
    info!(
        "Order placed successfully! Order #{} ({} item(s), {}) ships to {}",
        order.id,
        order.item_count(),
        Price::usd(order.total),
        order.shipping_address
    );
    Ok(())
}

/// The signed-in user's orders, newest first.
pub fn list<S: KeyValueStorage>(store: &DomainStore<S>) -> Result<()> {
    let user = require_user(store)?;
    let orders = store.user_orders(&user.id)?;

    if orders.is_empty() {
        info!("No orders yet");
        return Ok(());
    }

    for order in orders.iter().rev() {
        info!(
            "Order #{} | {} | {} | {}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.status,
            Price::usd(order.total)
        );
        for item in &order.items {
            info!(
                "    {} x{} @ {}",
                item.name,
                item.quantity,
                Price::usd(item.price)
            );
        }
    }
    Ok(())
}

pub fn notifications<S: KeyValueStorage>(store: &DomainStore<S>) -> Result<()> {
    let user = require_user(store)?;
    let notifications = store.user_notifications(&user.id)?;

    if notifications.is_empty() {
        info!("No notifications");
        return Ok(());
    }

    for n in notifications.iter().rev() {
        info!(
            "{} [{}] {} - {} ({})",
            if n.read { " " } else { "*" },
            n.id,
            n.title,
            n.message,
            n.kind
        );
    }
    Ok(())
}

pub fn mark_read<S: KeyValueStorage>(store: &DomainStore<S>, id: &str) -> Result<()> {
    require_user(store)?;
    let id = NotificationId::new(id);

    if !store.mark_notification_as_read(&id)? {
        return Err(AppError::NotFound(format!("notification {id}")));
    }
    info!("Marked as read");
    Ok(())
}
