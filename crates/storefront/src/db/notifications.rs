//! Notification repository.

use tracing::instrument;

use brightbuy_core::{NotificationId, UserId};

use super::{RepositoryError, read_list, write_list};
use crate::models::Notification;
use crate::storage::{KeyValueStorage, keys};

/// Repository for the global `notifications` collection.
pub struct NotificationRepository<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S: KeyValueStorage + ?Sized> NotificationRepository<'a, S> {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    fn list(&self) -> Result<Vec<Notification>, RepositoryError> {
        read_list(self.storage, keys::NOTIFICATIONS)
    }

    /// Notifications addressed to one user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the blob is invalid.
    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, RepositoryError> {
        let mut notifications = self.list()?;
        notifications.retain(|n| &n.user_id == user_id);
        Ok(notifications)
    }

    /// Append a notification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or written.
    #[instrument(skip_all, fields(notification_id = %notification.id, user_id = %notification.user_id))]
    pub fn create(&self, notification: &Notification) -> Result<(), RepositoryError> {
        let mut notifications = self.list()?;
        notifications.push(notification.clone());
        write_list(self.storage, keys::NOTIFICATIONS, &notifications)
    }

    /// Flag a notification as read.
    ///
    /// Returns `false` (and writes nothing) if no notification has this ID.
    /// Marking an already-read notification rewrites it unchanged and
    /// returns `true`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read or written.
    #[instrument(skip_all, fields(notification_id = %id))]
    pub fn mark_read(&self, id: &NotificationId) -> Result<bool, RepositoryError> {
        let mut notifications = self.list()?;

        let Some(notification) = notifications.iter_mut().find(|n| &n.id == id) else {
            return Ok(false);
        };
        notification.read = true;

        write_list(self.storage, keys::NOTIFICATIONS, &notifications)?;
        Ok(true)
    }
}
