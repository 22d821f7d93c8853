//! Typed repositories over key-value storage.
//!
//! # Layout
//!
//! Each repository owns one collection (see [`crate::storage::keys`]):
//!
//! - `users` - [`UserRepository`]
//! - `cart_<userId>` - [`CartRepository`]
//! - `orders` - [`OrderRepository`]
//! - `notifications` - [`NotificationRepository`]
//!
//! Every read parses the whole blob and every write replaces it. There is no
//! index: lookups are a linear scan.
//!
//! Updates that target a missing id return `Ok(false)` and leave storage
//! untouched.

pub mod carts;
pub mod notifications;
pub mod orders;
pub mod users;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::storage::{KeyValueStorage, StorageError};

pub use carts::CartRepository;
pub use notifications::NotificationRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A stored blob could not be parsed.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A value could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Cart quantities must be at least 1.
    #[error("invalid quantity {0}: must be at least 1")]
    InvalidQuantity(u32),

    /// The referenced user is not in the directory.
    #[error("user not found: {0}")]
    UserNotFound(String),
}

/// Parse the list stored under `key`. A missing key is an empty list.
pub(crate) fn read_list<T, S>(storage: &S, key: &str) -> Result<Vec<T>, RepositoryError>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    read_value(storage, key).map(Option::unwrap_or_default)
}

/// Serialize `items` and store them under `key`, replacing what was there.
pub(crate) fn write_list<T, S>(storage: &S, key: &str, items: &[T]) -> Result<(), RepositoryError>
where
    T: Serialize,
    S: KeyValueStorage + ?Sized,
{
    write_value(storage, key, items)
}

/// Parse the single value stored under `key`, if any.
pub(crate) fn read_value<T, S>(storage: &S, key: &str) -> Result<Option<T>, RepositoryError>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid `{key}` entry: {e}")))
}

/// Serialize `value` and store it under `key`.
pub(crate) fn write_value<T, S>(storage: &S, key: &str, value: &T) -> Result<(), RepositoryError>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    storage.set(key, raw)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_missing_key_reads_as_empty_list() {
        let storage = MemoryStorage::new();
        let items: Vec<u32> = read_list(&storage, "orders").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_malformed_blob_is_data_corruption() {
        let storage = MemoryStorage::with_entries([("orders", "{not json")]);
        let err = read_list::<u32, _>(&storage, "orders").unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(ref msg) if msg.contains("orders")));
    }

    #[test]
    fn test_write_then_read() {
        let storage = MemoryStorage::new();
        write_list(&storage, "numbers", &[1_u32, 2, 3]).unwrap();
        assert_eq!(storage.get("numbers").unwrap().as_deref(), Some("[1,2,3]"));
        assert_eq!(read_list::<u32, _>(&storage, "numbers").unwrap(), vec![1, 2, 3]);
    }
}
