//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Sign-in, sign-up and profile edits
//! - `checkout` - Cart pricing and order placement
//! - `dashboard` - Admin metrics and order management
//!
//! Services borrow a [`crate::store::DomainStore`] and apply the form and
//! access rules that sit above the raw store operations.

pub mod auth;
pub mod checkout;
pub mod dashboard;

pub use auth::{AuthError, AuthService, ProfileUpdate};
pub use checkout::{
    CartLine, CartSummary, CheckoutError, CheckoutRequest, CheckoutService, OrderTotals,
    PaymentDetails, ShippingDetails,
};
pub use dashboard::{CartActivity, DashboardError, DashboardMetrics, DashboardService, OrderRow};
