//! BrightBuy Core - Shared types library.
//!
//! This crate provides common types used across all BrightBuy components:
//! - `storefront` - The domain store (users, carts, orders, notifications)
//! - `cli` - Command-line front end that drives the store
//!
//! # Architecture
//!
//! The core crate contains only types - no storage access, no clocks, no
//! global state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
