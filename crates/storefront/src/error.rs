//! Unified error handling.
//!
//! Provides a unified `AppError` type for front ends (such as the CLI) that
//! call several services and want one error to report.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::services::dashboard::DashboardError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage or repository operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout was rejected or failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Dashboard access was rejected or failed.
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not signed in.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad input.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error was caused by user input rather than a broken
    /// store, so front ends can word the message accordingly.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Repository(
                RepositoryError::InvalidQuantity(_) | RepositoryError::UserNotFound(_),
            )
            | Self::NotFound(_)
            | Self::Unauthorized(_)
            | Self::BadRequest(_) => true,
            Self::Auth(err) => !matches!(err, AuthError::Repository(_)),
            Self::Checkout(err) => !matches!(err, CheckoutError::Repository(_)),
            Self::Dashboard(err) => !matches!(err, DashboardError::Repository(_)),
            Self::Repository(_) | Self::Config(_) => false,
        }
    }
}

/// Result type alias for storefront front ends.
pub type Result<T> = std::result::Result<T, AppError>;
