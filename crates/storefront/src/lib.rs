//! BrightBuy storefront library.
//!
//! The domain store persists users, per-user carts, orders, notifications
//! and the signed-in session as JSON blobs in a flat key-value backend.
//! Services on top apply the sign-in, checkout and admin rules, and a
//! static catalog supplies product data.
//!
//! ```
//! use brightbuy_core::{ProductId, UserId};
//! use brightbuy_storefront::{DomainStore, MemoryStorage};
//!
//! let store = DomainStore::open(MemoryStorage::new())?;
//! let user = UserId::new("user-1");
//! store.add_to_cart(&user, &ProductId::new("1"), 1)?;
//! store.add_to_cart(&user, &ProductId::new("1"), 1)?;
//! assert_eq!(store.cart(&user)?[0].quantity, 2);
//! # Ok::<(), brightbuy_storefront::RepositoryError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod ids;
pub mod models;
pub mod seed;
pub mod services;
pub mod session;
pub mod storage;
pub mod store;

pub use catalog::Catalog;
pub use config::{ConfigError, LogFormat, PricingConfig, StoreConfig};
pub use db::RepositoryError;
pub use error::AppError;
pub use events::{StoreEvent, StoreEvents};
pub use session::Session;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::DomainStore;
