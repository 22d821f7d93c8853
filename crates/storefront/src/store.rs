//! The domain store.
//!
//! [`DomainStore`] is the single entry point for persisted storefront state.
//! It composes the repositories over one storage backend, owns the
//! [`Session`], and publishes [`StoreEvent`]s after cart and order-status
//! writes.
//!
//! Updates that target a missing id return `Ok(false)` and leave storage
//! untouched.

use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use brightbuy_core::{Email, NotificationId, OrderId, OrderStatus, ProductId, UserId};

use crate::db::{
    CartRepository, NotificationRepository, OrderRepository, RepositoryError, UserRepository,
};
use crate::events::{StoreEvent, StoreEvents};
use crate::ids::TimestampIds;
use crate::models::{CartItem, Notification, Order, User};
use crate::seed;
use crate::session::Session;
use crate::storage::KeyValueStorage;

/// Typed access to users, carts, orders, notifications and the session.
#[derive(Debug)]
pub struct DomainStore<S> {
    storage: S,
    session: Session,
    events: StoreEvents,
    ids: TimestampIds,
}

impl<S: KeyValueStorage> DomainStore<S> {
    /// Open a store over `storage`, restoring any saved session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the saved session cannot be read.
    pub fn open(storage: S) -> Result<Self, RepositoryError> {
        let session = Session::load(&storage)?;
        debug!(signed_in = session.is_signed_in(), "Opened domain store");
        Ok(Self {
            storage,
            session,
            events: StoreEvents::default(),
            ids: TimestampIds::new(),
        })
    }

    /// The underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Close the store and return its backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// The current session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Subscribe to store change events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// A fresh timestamp-derived id for a new order, notification or user.
    #[must_use]
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    fn users(&self) -> UserRepository<'_, S> {
        UserRepository::new(&self.storage)
    }

    fn carts(&self) -> CartRepository<'_, S> {
        CartRepository::new(&self.storage)
    }

    fn orders(&self) -> OrderRepository<'_, S> {
        OrderRepository::new(&self.storage)
    }

    fn notifications(&self) -> NotificationRepository<'_, S> {
        NotificationRepository::new(&self.storage)
    }

    // Session

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    /// Sign `user` in, or sign out with `None`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UserNotFound` if `user` is not in the
    /// directory; the session is left unchanged.
    #[instrument(skip_all, fields(user_id = user.as_ref().map(|u| u.id.as_str())))]
    pub fn set_current_user(&mut self, user: Option<User>) -> Result<(), RepositoryError> {
        if let Some(u) = &user {
            if self.users().get_by_id(&u.id)?.is_none() {
                return Err(RepositoryError::UserNotFound(u.id.to_string()));
            }
        }
        self.session.replace(&self.storage, user)
    }

    /// Sign in the first user whose email matches exactly.
    ///
    /// The password is not checked against anything; it only has to be
    /// non-empty. Returns `None` and leaves the session alone when nothing
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory cannot be read or the
    /// session cannot be written.
    #[instrument(skip_all, fields(email = %email))]
    pub fn login_user(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        if password.is_empty() {
            debug!("Empty password");
            return Ok(None);
        }

        let Some(user) = self.users().get_by_email(email)? else {
            debug!("No account for email");
            return Ok(None);
        };

        self.session.replace(&self.storage, Some(user.clone()))?;
        Ok(Some(user))
    }

    /// Create an account and sign it in.
    ///
    /// Duplicate emails are accepted. The password is not stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory or session cannot be written.
    #[instrument(skip_all, fields(email = %email))]
    pub fn register_user(
        &mut self,
        email: Email,
        _password: &str,
        name: &str,
    ) -> Result<User, RepositoryError> {
        let user = User::new(UserId::new(self.next_id()), email, name);
        self.users().upsert(&user)?;
        info!(user_id = %user.id, "Registered user");

        self.session.replace(&self.storage, Some(user.clone()))?;
        Ok(user)
    }

    /// Clear the session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if storage cannot be written.
    pub fn logout_user(&mut self) -> Result<(), RepositoryError> {
        self.session.replace(&self.storage, None)
    }

    // Users

    /// Every account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory cannot be read.
    pub fn all_users(&self) -> Result<Vec<User>, RepositoryError> {
        self.users().list()
    }

    /// Insert or replace a user by id. Saving the signed-in user also
    /// refreshes the session snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory or session cannot be written.
    pub fn save_user(&mut self, user: &User) -> Result<(), RepositoryError> {
        self.users().upsert(user)?;
        if self.session.user_id() == Some(&user.id) {
            self.session.replace(&self.storage, Some(user.clone()))?;
        }
        Ok(())
    }

    // Carts

    /// A user's cart lines; empty if the user never added anything.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be read.
    pub fn cart(&self, user_id: &UserId) -> Result<Vec<CartItem>, RepositoryError> {
        self.carts().get(user_id)
    }

    /// Add units of a product, merging into an existing line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidQuantity` for a zero quantity.
    pub fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let cart = self.carts().add(user_id, product_id, quantity)?;
        self.cart_changed(user_id);
        Ok(cart)
    }

    /// Set the quantity of a line already in the cart.
    ///
    /// Returns `false` if the product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidQuantity` for a zero quantity.
    pub fn update_cart_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, RepositoryError> {
        let updated = self.carts().set_quantity(user_id, product_id, quantity)?;
        if updated {
            self.cart_changed(user_id);
        }
        Ok(updated)
    }

    /// Remove a product line.
    ///
    /// Returns `false` if the product was not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be read or written.
    pub fn remove_from_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, RepositoryError> {
        let removed = self.carts().remove(user_id, product_id)?;
        if removed {
            self.cart_changed(user_id);
        }
        Ok(removed)
    }

    /// Empty a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be written.
    pub fn clear_cart(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.carts().clear(user_id)?;
        self.cart_changed(user_id);
        Ok(())
    }

    fn cart_changed(&self, user_id: &UserId) {
        self.events.publish(StoreEvent::CartChanged {
            user_id: user_id.clone(),
        });
    }

    // Orders

    /// Every order from every customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn all_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        self.orders().list()
    }

    /// Orders placed by one customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn user_orders(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        self.orders().list_for_user(user_id)
    }

    /// Append a fully-formed order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be written.
    pub fn create_order(&self, order: &Order) -> Result<(), RepositoryError> {
        self.orders().create(order)?;
        info!(order_id = %order.id, user_id = %order.user_id, total = %order.total, "Order created");
        Ok(())
    }

    /// Change an order's status. Any transition is allowed.
    ///
    /// Returns `false` if no order has this id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or written.
    pub fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<bool, RepositoryError> {
        let updated = self.orders().update_status(order_id, status)?;
        if updated {
            info!(order_id = %order_id, status = %status, "Order status updated");
            self.events.publish(StoreEvent::OrderStatusChanged {
                order_id: order_id.clone(),
            });
        }
        Ok(updated)
    }

    // Notifications

    /// Notifications addressed to one user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn user_notifications(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, RepositoryError> {
        self.notifications().list_for_user(user_id)
    }

    /// Append a notification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be written.
    pub fn create_notification(&self, notification: &Notification) -> Result<(), RepositoryError> {
        self.notifications().create(notification)
    }

    /// Flag a notification as read.
    ///
    /// Returns `false` if no notification has this id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or written.
    pub fn mark_notification_as_read(&self, id: &NotificationId) -> Result<bool, RepositoryError> {
        self.notifications().mark_read(id)
    }

    // Seeding

    /// Install the demo admin and customer accounts into an empty directory.
    ///
    /// Returns `false` without writing if any account already exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory cannot be read or written.
    #[instrument(skip_all)]
    pub fn initialize_demo_data(&self) -> Result<bool, RepositoryError> {
        let users = self.users();
        if !users.list()?.is_empty() {
            debug!("Directory not empty, skipping demo data");
            return Ok(false);
        }

        for user in seed::demo_users() {
            users.upsert(&user)?;
        }
        info!("Installed demo accounts");
        Ok(true)
    }
}
