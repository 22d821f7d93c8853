//! Authentication service.
//!
//! Applies the sign-in and sign-up form rules on top of the store's
//! session operations. There is no real credential check: passwords are
//! validated for shape and then discarded.

mod error;

pub use error::AuthError;

use tracing::{info, instrument};

use brightbuy_core::Email;

use crate::models::User;
use crate::storage::KeyValueStorage;
use crate::store::DomainStore;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Profile fields a signed-in user may edit. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Authentication service.
///
/// Handles sign-in, sign-up, sign-out and profile edits for the store's
/// session.
pub struct AuthService<'a, S> {
    store: &'a mut DomainStore<S>,
}

impl<'a, S: KeyValueStorage> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a mut DomainStore<S>) -> Self {
        Self { store }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if either field is blank.
    /// Returns `AuthError::InvalidCredentials` if no account has this email.
    #[instrument(skip_all, fields(email = %email))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let user = self
            .store
            .login_user(email.trim(), password)?
            .ok_or(AuthError::InvalidCredentials)?;

        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    #[instrument(skip_all, fields(email = %email))]
    pub fn register(&mut self, email: &str, password: &str, name: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() || name.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(email)?;
        validate_password(password)?;

        let user = self.store.register_user(email, password, name.trim())?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the session cannot be cleared.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.store.logout_user()?;
        Ok(())
    }

    /// Apply profile edits to the signed-in user.
    ///
    /// Blank optional fields (phone, address) clear the stored value.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` without a session.
    /// Returns `AuthError::MissingFields` if the name is set to blank.
    /// Returns `AuthError::InvalidEmail` if the new email is malformed.
    #[instrument(skip_all)]
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<User, AuthError> {
        let mut user = self
            .store
            .current_user()
            .cloned()
            .ok_or(AuthError::NotSignedIn)?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(AuthError::MissingFields);
            }
            user.name = name.trim().to_owned();
        }
        if let Some(email) = update.email {
            user.email = Email::parse(&email)?;
        }
        if let Some(phone) = update.phone {
            user.phone = non_blank(&phone);
        }
        if let Some(address) = update.address {
            user.address = non_blank(&address);
        }

        self.store.save_user(&user)?;
        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Check a sign-up password against the length rule.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}
