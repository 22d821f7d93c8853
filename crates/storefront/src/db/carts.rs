//! Per-user cart repository.
//!
//! Each user's cart lives under its own `cart_<userId>` key. A missing key
//! is an empty cart; clearing writes an empty list rather than deleting.

use tracing::{debug, instrument};

use brightbuy_core::{ProductId, UserId};

use super::{RepositoryError, read_list, write_list};
use crate::models::CartItem;
use crate::storage::{KeyValueStorage, keys};

/// Repository for `cart_<userId>` collections.
pub struct CartRepository<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S: KeyValueStorage + ?Sized> CartRepository<'a, S> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// The user's cart lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the cart blob is invalid.
    pub fn get(&self, user_id: &UserId) -> Result<Vec<CartItem>, RepositoryError> {
        read_list(self.storage, &keys::cart(user_id))
    }

    /// Add `quantity` units of a product, merging into an existing line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidQuantity` if `quantity` is zero or
    /// the merged quantity overflows.
    #[instrument(skip_all, fields(user_id = %user_id, product_id = %product_id, quantity = quantity))]
    pub fn add(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        ensure_quantity(quantity)?;
        let mut cart = self.get(user_id)?;

        match cart.iter_mut().find(|item| &item.product_id == product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or(RepositoryError::InvalidQuantity(quantity))?;
            }
            None => cart.push(CartItem::new(product_id.clone(), quantity)),
        }

        self.save(user_id, &cart)?;
        debug!(lines = cart.len(), "Added to cart");
        Ok(cart)
    }

    /// Set the quantity of an existing line.
    ///
    /// Returns `false` (and writes nothing) if the product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidQuantity` if `quantity` is zero.
    #[instrument(skip_all, fields(user_id = %user_id, product_id = %product_id, quantity = quantity))]
    pub fn set_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<bool, RepositoryError> {
        ensure_quantity(quantity)?;
        let mut cart = self.get(user_id)?;

        let Some(item) = cart.iter_mut().find(|item| &item.product_id == product_id) else {
            debug!("Product not in cart");
            return Ok(false);
        };
        item.quantity = quantity;

        self.save(user_id, &cart)?;
        Ok(true)
    }

    /// Remove a product line.
    ///
    /// Returns `false` (and writes nothing) if the product was not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be read or written.
    #[instrument(skip_all, fields(user_id = %user_id, product_id = %product_id))]
    pub fn remove(&self, user_id: &UserId, product_id: &ProductId) -> Result<bool, RepositoryError> {
        let mut cart = self.get(user_id)?;
        let before = cart.len();
        cart.retain(|item| &item.product_id != product_id);

        if cart.len() == before {
            return Ok(false);
        }

        self.save(user_id, &cart)?;
        Ok(true)
    }

    /// Replace the cart with an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be written.
    pub fn clear(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.save(user_id, &[])
    }

    fn save(&self, user_id: &UserId, cart: &[CartItem]) -> Result<(), RepositoryError> {
        write_list(self.storage, &keys::cart(user_id), cart)
    }
}

fn ensure_quantity(quantity: u32) -> Result<(), RepositoryError> {
    if quantity == 0 {
        return Err(RepositoryError::InvalidQuantity(quantity));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn ids() -> (UserId, ProductId, ProductId) {
        (UserId::new("u"), ProductId::new("1"), ProductId::new("2"))
    }

    #[test]
    fn test_add_merges_same_product() {
        let storage = MemoryStorage::new();
        let carts = CartRepository::new(&storage);
        let (user, p1, p2) = ids();

        carts.add(&user, &p1, 1).unwrap();
        carts.add(&user, &p1, 1).unwrap();
        let cart = carts.add(&user, &p2, 3).unwrap();

        assert_eq!(
            cart,
            vec![CartItem::new(p1.clone(), 2), CartItem::new(p2.clone(), 3)]
        );
        assert_eq!(carts.get(&user).unwrap(), cart);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let storage = MemoryStorage::new();
        let carts = CartRepository::new(&storage);
        let (user, p1, _) = ids();

        assert!(matches!(
            carts.add(&user, &p1, 0),
            Err(RepositoryError::InvalidQuantity(0))
        ));
        carts.add(&user, &p1, 1).unwrap();
        assert!(matches!(
            carts.set_quantity(&user, &p1, 0),
            Err(RepositoryError::InvalidQuantity(0))
        ));
        assert_eq!(carts.get(&user).unwrap()[0].quantity, 1);
    }

    #[test]
    fn test_overflow_rejected() {
        let storage = MemoryStorage::new();
        let carts = CartRepository::new(&storage);
        let (user, p1, _) = ids();

        carts.add(&user, &p1, u32::MAX).unwrap();
        assert!(carts.add(&user, &p1, 1).is_err());
        assert_eq!(carts.get(&user).unwrap()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity_missing_product_writes_nothing() {
        let storage = MemoryStorage::new();
        let carts = CartRepository::new(&storage);
        let (user, p1, p2) = ids();

        assert!(!carts.set_quantity(&user, &p1, 4).unwrap());
        assert!(storage.is_empty());

        carts.add(&user, &p1, 1).unwrap();
        assert!(!carts.set_quantity(&user, &p2, 4).unwrap());
        assert!(carts.set_quantity(&user, &p1, 4).unwrap());
        assert_eq!(carts.get(&user).unwrap(), vec![CartItem::new(p1, 4)]);
    }

    #[test]
    fn test_remove_and_clear() {
        let storage = MemoryStorage::new();
        let carts = CartRepository::new(&storage);
        let (user, p1, p2) = ids();

        assert!(!carts.remove(&user, &p1).unwrap());
        assert!(carts.get(&user).unwrap().is_empty());

        carts.add(&user, &p1, 1).unwrap();
        carts.add(&user, &p2, 1).unwrap();
        assert!(carts.remove(&user, &p1).unwrap());
        assert_eq!(carts.get(&user).unwrap(), vec![CartItem::new(p2, 1)]);

        carts.clear(&user).unwrap();
        assert!(carts.get(&user).unwrap().is_empty());
        assert_eq!(storage.get("cart_u").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_carts_are_per_user() {
        let storage = MemoryStorage::new();
        let carts = CartRepository::new(&storage);
        let (user, p1, _) = ids();
        let other = UserId::new("other");

        carts.add(&user, &p1, 2).unwrap();
        assert!(carts.get(&other).unwrap().is_empty());
    }
}
