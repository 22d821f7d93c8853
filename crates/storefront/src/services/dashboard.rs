//! Admin dashboard: store-wide metrics and order management.
//!
//! Only an admin session can open the dashboard.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument};

use brightbuy_core::{OrderId, OrderStatus, UserId};

use crate::db::RepositoryError;
use crate::models::{Order, User, cart};
use crate::storage::KeyValueStorage;
use crate::store::DomainStore;

/// Number of orders shown in the "recent orders" panel.
pub const RECENT_ORDERS: usize = 5;

/// Errors that can occur on the admin dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("sign in to view the dashboard")]
    NotSignedIn,

    #[error("user {0} is not an admin")]
    Forbidden(UserId),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// An order together with the name of the customer who placed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub order: Order,
    /// `None` when the customer is no longer in the directory.
    pub customer_name: Option<String>,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    /// Sum of every order's total.
    pub total_revenue: Decimal,
    pub total_orders: usize,
    /// Accounts without the admin flag.
    pub total_customers: usize,
    /// Up to [`RECENT_ORDERS`] orders, newest first.
    pub recent_orders: Vec<OrderRow>,
}

/// Units sitting in one user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartActivity {
    pub user_id: UserId,
    pub name: String,
    pub item_count: u32,
}

/// Admin dashboard service.
pub struct DashboardService<'a, S> {
    store: &'a DomainStore<S>,
}

impl<'a, S: KeyValueStorage> DashboardService<'a, S> {
    /// Open the dashboard for the store's signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NotSignedIn` without a session and
    /// `DashboardError::Forbidden` for a non-admin session.
    pub fn for_session(store: &'a DomainStore<S>) -> Result<Self, DashboardError> {
        let user = store.current_user().ok_or(DashboardError::NotSignedIn)?;
        if !user.is_admin() {
            return Err(DashboardError::Forbidden(user.id.clone()));
        }
        Ok(Self { store })
    }

    /// Revenue, order and customer counts, and the most recent orders.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Repository` if a collection cannot be read.
    pub fn metrics(&self) -> Result<DashboardMetrics, DashboardError> {
        let orders = self.store.all_orders()?;
        let users = self.store.all_users()?;

        let total_revenue: Decimal = orders.iter().map(|o| o.total).sum();
        let total_orders = orders.len();
        let total_customers = users.iter().filter(|u| !u.is_admin()).count();

        let recent_orders = orders
            .into_iter()
            .rev()
            .take(RECENT_ORDERS)
            .map(|order| with_customer(order, &users))
            .collect();

        Ok(DashboardMetrics {
            total_revenue,
            total_orders,
            total_customers,
            recent_orders,
        })
    }

    /// Every order, oldest first, with customer names.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Repository` if a collection cannot be read.
    pub fn orders(&self) -> Result<Vec<OrderRow>, DashboardError> {
        let users = self.store.all_users()?;
        Ok(self
            .store
            .all_orders()?
            .into_iter()
            .map(|order| with_customer(order, &users))
            .collect())
    }

    /// Cart sizes for every account with something in its cart.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Repository` if a collection cannot be read.
    pub fn cart_activity(&self) -> Result<Vec<CartActivity>, DashboardError> {
        let mut activity = Vec::new();
        for user in self.store.all_users()? {
            let item_count = cart::item_count(&self.store.cart(&user.id)?);
            if item_count > 0 {
                activity.push(CartActivity {
                    user_id: user.id,
                    name: user.name,
                    item_count,
                });
            }
        }
        Ok(activity)
    }

    /// Move an order to any status.
    ///
    /// Returns `false` if no order has this id.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Repository` if the orders cannot be written.
    #[instrument(skip_all, fields(order_id = %order_id, status = %status))]
    pub fn set_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<bool, DashboardError> {
        let updated = self.store.update_order_status(order_id, status)?;
        if updated {
            info!("Admin updated order status");
        }
        Ok(updated)
    }
}

fn with_customer(order: Order, users: &[User]) -> OrderRow {
    let customer_name = users
        .iter()
        .find(|u| u.id == order.user_id)
        .map(|u| u.name.clone());
    OrderRow {
        order,
        customer_name,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use brightbuy_core::ProductId;
    use chrono::Utc;

    use super::*;
    use crate::seed;
    use crate::storage::MemoryStorage;

    fn store_with_orders(count: i64) -> DomainStore<MemoryStorage> {
        let store = DomainStore::open(MemoryStorage::new()).unwrap();
        store.initialize_demo_data().unwrap();
        for n in 1..=count {
            store
                .create_order(&Order {
                    id: OrderId::new(n.to_string()),
                    user_id: UserId::new(seed::DEMO_CUSTOMER_ID),
                    items: Vec::new(),
                    total: Decimal::new(n * 1000, 2),
                    status: OrderStatus::Pending,
                    shipping_address: "1 Main St, Town, 11111".to_owned(),
                    created_at: Utc::now(),
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_requires_admin() {
        let mut store = store_with_orders(0);
        assert!(matches!(
            DashboardService::for_session(&store),
            Err(DashboardError::NotSignedIn)
        ));

        store.login_user(seed::DEMO_CUSTOMER_EMAIL, "pw").unwrap();
        assert!(matches!(
            DashboardService::for_session(&store),
            Err(DashboardError::Forbidden(_))
        ));

        store.login_user(seed::DEMO_ADMIN_EMAIL, "pw").unwrap();
        assert!(DashboardService::for_session(&store).is_ok());
    }

    #[test]
    fn test_metrics() {
        let mut store = store_with_orders(7);
        store.login_user(seed::DEMO_ADMIN_EMAIL, "pw").unwrap();
        let metrics = DashboardService::for_session(&store)
            .unwrap()
            .metrics()
            .unwrap();

        // 10 + 20 + ... + 70
        assert_eq!(metrics.total_revenue, Decimal::new(28000, 2));
        assert_eq!(metrics.total_orders, 7);
        assert_eq!(metrics.total_customers, 1);

        let recent: Vec<_> = metrics
            .recent_orders
            .iter()
            .map(|row| row.order.id.as_str())
            .collect();
        assert_eq!(recent, vec!["7", "6", "5", "4", "3"]);
        assert_eq!(
            metrics.recent_orders[0].customer_name.as_deref(),
            Some("Demo Customer")
        );
    }

    #[test]
    fn test_empty_metrics() {
        let mut store = store_with_orders(0);
        store.login_user(seed::DEMO_ADMIN_EMAIL, "pw").unwrap();
        let metrics = DashboardService::for_session(&store)
            .unwrap()
            .metrics()
            .unwrap();

        assert_eq!(metrics.total_revenue, Decimal::ZERO);
        assert!(metrics.recent_orders.is_empty());
    }

    #[test]
    fn test_orders_with_unknown_customer() {
        let mut store = store_with_orders(1);
        store
            .create_order(&Order {
                user_id: UserId::new("deleted"),
                id: OrderId::new("2"),
                ..store.all_orders().unwrap()[0].clone()
            })
            .unwrap();
        store.login_user(seed::DEMO_ADMIN_EMAIL, "pw").unwrap();

        let rows = DashboardService::for_session(&store).unwrap().orders().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].customer_name, None);
    }

    #[test]
    fn test_cart_activity() {
        let mut store = store_with_orders(0);
        let customer = UserId::new(seed::DEMO_CUSTOMER_ID);
        store.add_to_cart(&customer, &ProductId::new("1"), 2).unwrap();
        store.add_to_cart(&customer, &ProductId::new("3"), 1).unwrap();
        store.login_user(seed::DEMO_ADMIN_EMAIL, "pw").unwrap();

        let activity = DashboardService::for_session(&store)
            .unwrap()
            .cart_activity()
            .unwrap();
        assert_eq!(
            activity,
            vec![CartActivity {
                user_id: customer,
                name: "Demo Customer".to_owned(),
                item_count: 3,
            }]
        );
    }

    #[test]
    fn test_set_order_status() {
        let mut store = store_with_orders(1);
        store.login_user(seed::DEMO_ADMIN_EMAIL, "pw").unwrap();
        let dashboard = DashboardService::for_session(&store).unwrap();

        assert!(
            dashboard
                .set_order_status(&OrderId::new("1"), OrderStatus::Delivered)
                .unwrap()
        );
        assert!(
            !dashboard
                .set_order_status(&OrderId::new("404"), OrderStatus::Shipped)
                .unwrap()
        );
        assert_eq!(
            store.all_orders().unwrap()[0].status,
            OrderStatus::Delivered
        );
    }
}
