//! CLI command implementations.
//!
//! Commands report through `tracing` at `info` level, so output honours the
//! configured log format.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;

use brightbuy_storefront::error::AppError;
use brightbuy_storefront::models::User;
use brightbuy_storefront::{DomainStore, KeyValueStorage};

/// The signed-in user, or an error telling the caller to sign in.
fn require_user<S: KeyValueStorage>(store: &DomainStore<S>) -> Result<&User, AppError> {
    store
        .current_user()
        .ok_or_else(|| AppError::Unauthorized("sign in first with `bb-cli login`".to_owned()))
}
