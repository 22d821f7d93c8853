//! Demo accounts installed into an empty directory.

use brightbuy_core::{Email, UserId};

use crate::models::User;

/// ID of the seeded admin account.
pub const DEMO_ADMIN_ID: &str = "admin-1";
/// Email of the seeded admin account.
pub const DEMO_ADMIN_EMAIL: &str = "admin@brightbuy.com";
/// ID of the seeded customer account.
pub const DEMO_CUSTOMER_ID: &str = "user-1";
/// Email of the seeded customer account.
pub const DEMO_CUSTOMER_EMAIL: &str = "demo@example.com";

/// The two demo accounts, admin first.
///
/// The admin carries no address or phone; the customer has both so the
/// checkout form can be pre-filled.
#[must_use]
pub fn demo_users() -> [User; 2] {
    let admin = User {
        id: UserId::new(DEMO_ADMIN_ID),
        email: Email::from_trusted(DEMO_ADMIN_EMAIL),
        name: "Admin User".to_owned(),
        address: None,
        phone: None,
        admin: Some(true),
    };

    let customer = User {
        id: UserId::new(DEMO_CUSTOMER_ID),
        email: Email::from_trusted(DEMO_CUSTOMER_EMAIL),
        name: "Demo Customer".to_owned(),
        address: Some("123 Main St, City, State 12345".to_owned()),
        phone: Some("(555) 123-4567".to_owned()),
        admin: None,
    };

    [admin, customer]
}
