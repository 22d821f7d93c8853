//! Domain models persisted by the store.
//!
//! Field names serialize in camelCase so the stored blobs keep the layout
//! the storefront has always used (`productId`, `isAdmin`, `createdAt`, ...).

pub mod cart;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartItem;
pub use notification::Notification;
pub use order::{Order, OrderItem};
pub use product::Product;
pub use user::User;
