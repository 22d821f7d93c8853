//! Account commands: seeding, sign-in, sign-up and profile edits.

use tracing::info;

use brightbuy_storefront::error::Result;
use brightbuy_storefront::models::{cart, notification};
use brightbuy_storefront::seed::{DEMO_ADMIN_EMAIL, DEMO_CUSTOMER_EMAIL};
use brightbuy_storefront::services::{AuthService, ProfileUpdate};
use brightbuy_storefront::{DomainStore, KeyValueStorage};

use super::require_user;

/// Install the demo accounts into an empty directory.
pub fn seed<S: KeyValueStorage>(store: &DomainStore<S>) -> Result<()> {
    if store.initialize_demo_data()? {
        info!("Installed demo accounts: {DEMO_ADMIN_EMAIL} (admin), {DEMO_CUSTOMER_EMAIL}");
    } else {
        info!("Accounts already exist, nothing to seed");
    }
    Ok(())
}

pub fn login<S: KeyValueStorage>(
    store: &mut DomainStore<S>,
    email: &str,
    password: &str,
) -> Result<()> {
    let user = AuthService::new(store).login(email, password)?;
    info!("Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

pub fn register<S: KeyValueStorage>(
    store: &mut DomainStore<S>,
    email: &str,
    password: &str,
    name: &str,
) -> Result<()> {
    let user = AuthService::new(store).register(email, password, name)?;
    info!("Welcome, {}! Your account id is {}", user.name, user.id);
    Ok(())
}

pub fn logout<S: KeyValueStorage>(store: &mut DomainStore<S>) -> Result<()> {
    if store.current_user().is_none() {
        info!("Not signed in");
        return Ok(());
    }
    AuthService::new(store).logout()?;
    info!("Signed out");
    Ok(())
}

/// Show the signed-in account with its cart and notification badges.
pub fn whoami<S: KeyValueStorage>(store: &DomainStore<S>) -> Result<()> {
    let Some(user) = store.current_user() else {
        info!("Not signed in");
        return Ok(());
    };

    let cart_items = cart::item_count(&store.cart(&user.id)?);
    let unread = notification::unread_count(&store.user_notifications(&user.id)?);

    info!(
        "{} <{}>{}",
        user.name,
        user.email,
        if user.is_admin() { " [admin]" } else { "" }
    );
    if let Some(phone) = &user.phone {
        info!("  phone:   {phone}");
    }
    if let Some(address) = &user.address {
        info!("  address: {address}");
    }
    info!("  cart: {cart_items} item(s), {unread} unread notification(s)");
    Ok(())
}

pub fn profile<S: KeyValueStorage>(
    store: &mut DomainStore<S>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
) -> Result<()> {
    require_user(store)?;

    let user = AuthService::new(store).update_profile(ProfileUpdate {
        name,
        email,
        phone,
        address,
    })?;
    info!("Profile updated for {}", user.name);
    Ok(())
}
