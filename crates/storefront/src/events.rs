//! Change notifications for store subscribers.
//!
//! Mutations publish a typed [`StoreEvent`] carrying only ids. Subscribers
//! re-query the store for current state, so a receiver that lags and drops
//! events only needs to refresh once.

use tokio::sync::broadcast;
use tracing::trace;

use brightbuy_core::{OrderId, UserId};

/// Default number of buffered events per subscriber.
pub const DEFAULT_CAPACITY: usize = 64;

/// Something in the store changed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreEvent {
    /// A user's cart was written (add, update, remove, clear).
    CartChanged { user_id: UserId },
    /// An order's status was updated.
    OrderStatusChanged { order_id: OrderId },
}

/// Broadcast hub for [`StoreEvent`]s.
#[derive(Debug, Clone)]
pub struct StoreEvents {
    tx: broadcast::Sender<StoreEvent>,
}

impl StoreEvents {
    /// Create a hub buffering up to `capacity` events per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub(crate) fn publish(&self, event: StoreEvent) {
        let delivered = self.tx.send(event).unwrap_or(0);
        trace!(delivered, "Published store event");
    }
}

impl Default for StoreEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
