//! The logged-in user.
//!
//! The session is an explicit value owned by [`crate::store::DomainStore`]
//! rather than ambient global state. It is loaded from the `currentUser`
//! key when the store opens and written through on every change, so a
//! reopened store resumes the same login.

use tracing::{info, warn};

use brightbuy_core::UserId;

use crate::db::{RepositoryError, UserRepository, read_value, write_value};
use crate::models::User;
use crate::storage::{KeyValueStorage, keys};

/// Snapshot of the signed-in user, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// Restore the session from storage.
    ///
    /// A stored user that is no longer in the directory is discarded, so
    /// the session never points at an unknown account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if storage cannot be read or the stored
    /// snapshot is malformed.
    pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> Result<Self, RepositoryError> {
        let user: Option<User> = read_value(storage, keys::CURRENT_USER)?;

        let Some(user) = user else {
            return Ok(Self::default());
        };

        if UserRepository::new(storage).get_by_id(&user.id)?.is_none() {
            warn!(user_id = %user.id, "Stored session refers to an unknown user, clearing it");
            storage.remove(keys::CURRENT_USER)?;
            return Ok(Self::default());
        }

        Ok(Self { user: Some(user) })
    }

    /// The signed-in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// ID of the signed-in user.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.id)
    }

    /// Whether anyone is signed in.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Replace the session and persist it.
    pub(crate) fn replace<S: KeyValueStorage + ?Sized>(
        &mut self,
        storage: &S,
        user: Option<User>,
    ) -> Result<(), RepositoryError> {
        match &user {
            Some(u) => {
                write_value(storage, keys::CURRENT_USER, u)?;
                info!(user_id = %u.id, "Session started");
            }
            None => {
                storage.remove(keys::CURRENT_USER)?;
                if let Some(previous) = &self.user {
                    info!(user_id = %previous.id, "Session ended");
                }
            }
        }
        self.user = user;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use brightbuy_core::Email;

    use super::*;
    use crate::storage::MemoryStorage;

    fn demo() -> User {
        User::new(
            UserId::new("user-1"),
            Email::parse("demo@example.com").unwrap(),
            "Demo Customer",
        )
    }

    #[test]
    fn test_empty_storage_has_no_session() {
        let storage = MemoryStorage::new();
        let session = Session::load(&storage).unwrap();
        assert!(!session.is_signed_in());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_replace_writes_through() {
        let storage = MemoryStorage::new();
        UserRepository::new(&storage).upsert(&demo()).unwrap();

        let mut session = Session::default();
        session.replace(&storage, Some(demo())).unwrap();
        assert_eq!(Session::load(&storage).unwrap(), session);

        session.replace(&storage, None).unwrap();
        assert_eq!(storage.get(keys::CURRENT_USER).unwrap(), None);
    }

    #[test]
    fn test_unknown_user_is_dropped_on_load() {
        let storage = MemoryStorage::new();
        write_value(&storage, keys::CURRENT_USER, &demo()).unwrap();

        let session = Session::load(&storage).unwrap();
        assert!(!session.is_signed_in());
        assert_eq!(storage.get(keys::CURRENT_USER).unwrap(), None);
    }
}
