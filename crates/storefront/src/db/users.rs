//! User directory repository.

use tracing::{debug, instrument};

use brightbuy_core::UserId;

use super::{RepositoryError, read_list, write_list};
use crate::models::User;
use crate::storage::{KeyValueStorage, keys};

/// Repository for the `users` collection.
pub struct UserRepository<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S: KeyValueStorage + ?Sized> UserRepository<'a, S> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Every account, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the `users` blob is invalid.
    pub fn list(&self) -> Result<Vec<User>, RepositoryError> {
        read_list(self.storage, keys::USERS)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory cannot be read.
    pub fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|u| &u.id == id))
    }

    /// Get the first user whose email matches `email` exactly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory cannot be read.
    pub fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|u| u.email.matches(email)))
    }

    /// Insert or replace a user, matched by ID.
    ///
    /// Returns `true` if an existing entry was replaced.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the directory cannot be read or written.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn upsert(&self, user: &User) -> Result<bool, RepositoryError> {
        let mut users = self.list()?;

        let replaced = match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                existing.clone_from(user);
                true
            }
            None => {
                users.push(user.clone());
                false
            }
        };

        write_list(self.storage, keys::USERS, &users)?;
        debug!(replaced, total = users.len(), "Saved user");
        Ok(replaced)
    }
}
