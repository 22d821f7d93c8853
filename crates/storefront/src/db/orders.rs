//! Order repository.

use tracing::{debug, instrument};

use brightbuy_core::{OrderId, OrderStatus, UserId};

use super::{RepositoryError, read_list, write_list};
use crate::models::Order;
use crate::storage::{KeyValueStorage, keys};

/// Repository for the global `orders` collection.
pub struct OrderRepository<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S: KeyValueStorage + ?Sized> OrderRepository<'a, S> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Every order from every customer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the `orders` blob is invalid.
    pub fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        read_list(self.storage, keys::ORDERS)
    }

    /// Orders placed by one customer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.list()?;
        orders.retain(|o| &o.user_id == user_id);
        Ok(orders)
    }

    /// Append a fully-formed order. The caller supplies id, items, total and
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or written.
    #[instrument(skip_all, fields(order_id = %order.id, user_id = %order.user_id))]
    pub fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.list()?;
        orders.push(order.clone());
        write_list(self.storage, keys::ORDERS, &orders)?;
        debug!(total_orders = orders.len(), "Created order");
        Ok(())
    }

    /// Change an order's status. No other field is touched and any
    /// transition is allowed.
    ///
    /// Returns `false` (and writes nothing) if no order has this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or written.
    #[instrument(skip_all, fields(order_id = %id, status = %status))]
    pub fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<bool, RepositoryError> {
        let mut orders = self.list()?;

        let Some(order) = orders.iter_mut().find(|o| &o.id == id) else {
            debug!("Order not found");
            return Ok(false);
        };
        order.status = status;

        write_list(self.storage, keys::ORDERS, &orders)?;
        Ok(true)
    }
}
