//! Admin dashboard commands.
//!
//! # Usage
//!
//! ```bash
//! bb-cli login -e admin@brightbuy.com -p admin
//! bb-cli admin dashboard
//! bb-cli admin set-status 1718000000000 shipped
//! ```

use tracing::info;

use brightbuy_core::{OrderId, OrderStatus, Price};
use brightbuy_storefront::error::{AppError, Result};
use brightbuy_storefront::services::{DashboardService, OrderRow};
use brightbuy_storefront::{DomainStore, KeyValueStorage};

/// Headline metrics, recent orders and open carts.
pub fn dashboard<S: KeyValueStorage>(store: &DomainStore<S>) -> Result<()> {
    let dashboard = DashboardService::for_session(store)?;
    let metrics = dashboard.metrics()?;

    info!("Total revenue:   {}", Price::usd(metrics.total_revenue));
    info!("Total orders:    {}", metrics.total_orders);
    info!("Total customers: {}", metrics.total_customers);

    if metrics.recent_orders.is_empty() {
        info!("No orders yet");
    } else {
        info!("Recent orders:");
        for row in &metrics.recent_orders {
            log_row(row);
        }
    }

    for cart in dashboard.cart_activity()? {
        info!("Open cart: {} ({}) - {} item(s)", cart.name, cart.user_id, cart.item_count);
    }
    Ok(())
}

/// Every order with its customer.
pub fn orders<S: KeyValueStorage>(store: &DomainStore<S>) -> Result<()> {
    let rows = DashboardService::for_session(store)?.orders()?;
    if rows.is_empty() {
        info!("No orders yet");
    }
    for row in &rows {
        log_row(row);
    }
    Ok(())
}

pub fn set_status<S: KeyValueStorage>(
    store: &DomainStore<S>,
    order_id: &str,
    status: OrderStatus,
) -> Result<()> {
    let order_id = OrderId::new(order_id);
    if !DashboardService::for_session(store)?.set_order_status(&order_id, status)? {
        return Err(AppError::NotFound(format!("order {order_id}")));
    }
    info!("Order status updated!");
    Ok(())
}

fn log_row(row: &OrderRow) {
    info!(
        "  #{} | {} | {} item(s) | {} | {}",
        row.order.id,
        row.customer_name.as_deref().unwrap_or("Unknown"),
        row.order.items.len(),
        Price::usd(row.order.total),
        row.order.status
    );
}
