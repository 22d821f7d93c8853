//! User domain types.

use serde::{Deserialize, Serialize};

use brightbuy_core::{Email, UserId};

/// A storefront account.
///
/// Users are unique by `id`; email uniqueness is not enforced. Accounts are
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Default shipping address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Admin flag. Absent on accounts created before the flag existed.
    #[serde(rename = "isAdmin", default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
}

impl User {
    /// Create a regular (non-admin) account.
    #[must_use]
    pub fn new(id: UserId, email: Email, name: impl Into<String>) -> Self {
        Self {
            id,
            email,
            name: name.into(),
            address: None,
            phone: None,
            admin: Some(false),
        }
    }

    /// Whether this account may use the admin dashboard.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin.unwrap_or(false)
    }
}
