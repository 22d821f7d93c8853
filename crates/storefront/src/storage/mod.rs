//! Key-value storage backends.
//!
//! The store persists every collection as one serialized JSON blob under a
//! fixed key. Backends only move strings around; parsing happens in
//! [`crate::db`].
//!
//! ## Keys
//!
//! | Key | Value |
//! |---|---|
//! | `currentUser` | single user object, or absent |
//! | `users` | list of users |
//! | `cart_<userId>` | list of cart items, one key per user |
//! | `orders` | list of orders (global) |
//! | `notifications` | list of notifications (global) |
//!
//! Backends use interior mutability and are meant for a single writer.
//! Two processes writing the same file race with last-write-wins.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {path} is not valid: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The entry map could not be encoded.
    #[error("failed to encode storage: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A flat string key-value store, modeled on browser local storage.
pub trait KeyValueStorage {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write cannot be persisted.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// All keys currently present, in sorted order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Storage keys for each persisted collection.
pub mod keys {
    use brightbuy_core::UserId;

    /// Key for the logged-in user snapshot.
    pub const CURRENT_USER: &str = "currentUser";

    /// Key for the user directory.
    pub const USERS: &str = "users";

    /// Key for the global order list.
    pub const ORDERS: &str = "orders";

    /// Key for the global notification list.
    pub const NOTIFICATIONS: &str = "notifications";

    /// Prefix shared by every per-user cart key.
    pub const CART_PREFIX: &str = "cart_";

    /// Key for one user's cart.
    #[must_use]
    pub fn cart(user_id: &UserId) -> String {
        format!("{CART_PREFIX}{user_id}")
    }
}
