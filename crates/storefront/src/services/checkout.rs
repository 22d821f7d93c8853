//! Checkout: cart pricing and order placement.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, instrument};

use brightbuy_core::{NotificationId, NotificationKind, OrderId, OrderStatus, Price, UserId};

use crate::catalog::Catalog;
use crate::config::PricingConfig;
use crate::db::RepositoryError;
use crate::models::{Notification, Order, OrderItem, Product, User};
use crate::storage::KeyValueStorage;
use crate::store::DomainStore;

/// Errors that can occur while checking out.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A shipping field is blank.
    #[error("please fill in all shipping information")]
    MissingShipping,

    /// A payment field is blank.
    #[error("please fill in all payment information")]
    MissingPayment,

    /// No cart line resolves to a catalog product.
    #[error("your cart is empty")]
    EmptyCart,

    /// The store failed to read or write.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Where to send the order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    /// Recipient's full name.
    pub name: String,
    /// Contact email. Not validated beyond being non-blank.
    pub email: String,
    /// Street address.
    pub address: String,
    pub city: String,
    pub zip_code: String,
    /// Contact phone, free-form.
    pub phone: String,
}

impl ShippingDetails {
    /// Pre-fill from the account: name, email, and address/phone when set.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.to_string(),
            address: user.address.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    fn is_complete(&self) -> bool {
        [
            &self.name,
            &self.email,
            &self.address,
            &self.city,
            &self.zip_code,
            &self.phone,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    /// Single-line address stored on the order.
    #[must_use]
    pub fn one_line(&self) -> String {
        format!("{}, {}, {}", self.address, self.city, self.zip_code)
    }
}

/// Card details. Only checked for presence; nothing is charged or stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentDetails {
    /// Card number as typed, spaces allowed.
    pub card_number: String,
    /// Expiry as typed, e.g. `12/30`.
    pub expiry: String,
    /// Card security code.
    pub cvv: String,
}

impl PaymentDetails {
    fn is_complete(&self) -> bool {
        [&self.card_number, &self.expiry, &self.cvv]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Everything the checkout form submits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub shipping: ShippingDetails,
    pub payment: PaymentDetails,
}

/// A cart line joined with its catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Money breakdown for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of line totals, unrounded.
    pub subtotal: Decimal,
    /// Zero above the free-shipping threshold, else the flat rate.
    pub shipping: Decimal,
    /// Subtotal times the tax rate, rounded to cents.
    pub tax: Decimal,
    /// Subtotal plus shipping plus tax, rounded to cents.
    pub total: Decimal,
}

impl OrderTotals {
    /// Price a subtotal: free shipping strictly above the threshold, tax on
    /// the subtotal only, each amount rounded to cents.
    #[must_use]
    pub fn compute(subtotal: Decimal, pricing: &PricingConfig) -> Self {
        let shipping = if subtotal > pricing.free_shipping_threshold {
            Decimal::ZERO
        } else {
            pricing.flat_shipping
        };
        let tax = Price::round_to_cents(subtotal * pricing.tax_rate);
        let total = Price::round_to_cents(subtotal + shipping + tax);

        Self {
            subtotal,
            shipping,
            tax,
            total,
        }
    }
}

/// A priced view of a user's cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    /// Lines whose product exists in the catalog, in cart order.
    pub lines: Vec<CartLine>,
    pub totals: OrderTotals,
    /// Units across all lines.
    pub item_count: u32,
}

impl CartSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Checkout service.
pub struct CheckoutService<'a, S> {
    store: &'a DomainStore<S>,
    catalog: &'a Catalog,
    pricing: PricingConfig,
}

impl<'a, S: KeyValueStorage> CheckoutService<'a, S> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(
        store: &'a DomainStore<S>,
        catalog: &'a Catalog,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            pricing,
        }
    }

    /// Join the user's cart against the catalog and price it.
    ///
    /// Lines for products missing from the catalog are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Repository` if the cart cannot be read.
    pub fn cart_summary(&self, user_id: &UserId) -> Result<CartSummary, CheckoutError> {
        let lines: Vec<CartLine> = self
            .store
            .cart(user_id)?
            .into_iter()
            .filter_map(|item| match self.catalog.get(&item.product_id) {
                Some(product) => Some(CartLine {
                    product: product.clone(),
                    quantity: item.quantity,
                }),
                None => {
                    debug!(product_id = %item.product_id, "Skipping cart line for unknown product");
                    None
                }
            })
            .collect();

        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
        let item_count = lines
            .iter()
            .fold(0_u32, |total, line| total.saturating_add(line.quantity));

        Ok(CartSummary {
            totals: OrderTotals::compute(subtotal, &self.pricing),
            item_count,
            lines,
        })
    }

    /// Place an order for everything in the user's cart.
    ///
    /// Creates the order and an order notification, then empties the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingShipping` or `MissingPayment` for
    /// blank form fields, `EmptyCart` when nothing in the cart resolves to
    /// a product, and `Repository` if storage fails.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub fn place_order(
        &self,
        user_id: &UserId,
        request: &CheckoutRequest,
    ) -> Result<Order, CheckoutError> {
        if !request.shipping.is_complete() {
            return Err(CheckoutError::MissingShipping);
        }
        if !request.payment.is_complete() {
            return Err(CheckoutError::MissingPayment);
        }

        let summary = self.cart_summary(user_id)?;
        if summary.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order = Order {
            id: OrderId::new(self.store.next_id()),
            user_id: user_id.clone(),
            items: summary
                .lines
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product.id.clone(),
                    name: line.product.name.clone(),
                    price: line.product.price,
                    quantity: line.quantity,
                })
                .collect(),
            total: summary.totals.total,
            status: OrderStatus::Pending,
            shipping_address: request.shipping.one_line(),
            created_at: Utc::now(),
        };
        self.store.create_order(&order)?;

        self.store.create_notification(&Notification {
            id: NotificationId::new(self.store.next_id()),
            user_id: user_id.clone(),
            title: "Order Placed Successfully!".to_owned(),
            message: format!(
                "Your order #{} has been placed and is being processed.",
                order.id
            ),
            kind: NotificationKind::Order,
            read: false,
            created_at: order.created_at,
        })?;

        self.store.clear_cart(user_id)?;
        info!(order_id = %order.id, total = %order.total, "Order placed");
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use brightbuy_core::ProductId;

    use super::*;
    use crate::storage::MemoryStorage;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            shipping: ShippingDetails {
                name: "Demo Customer".to_owned(),
                email: "demo@example.com".to_owned(),
                address: "123 Main St".to_owned(),
                city: "Springfield".to_owned(),
                zip_code: "12345".to_owned(),
                phone: "(555) 123-4567".to_owned(),
            },
            payment: PaymentDetails {
                card_number: "4242 4242 4242 4242".to_owned(),
                expiry: "12/30".to_owned(),
                cvv: "123".to_owned(),
            },
        }
    }

    #[test]
    fn test_totals_free_shipping_above_threshold() {
        let totals = OrderTotals::compute(dec(29999), &PricingConfig::default());
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.tax, dec(2400));
        assert_eq!(totals.total, dec(32399));
    }

    #[test]
    fn test_totals_threshold_is_exclusive() {
        let pricing = PricingConfig::default();

        let at = OrderTotals::compute(dec(5000), &pricing);
        assert_eq!(at.shipping, dec(999));
        assert_eq!(at.tax, dec(400));
        assert_eq!(at.total, dec(6399));

        let above = OrderTotals::compute(dec(5001), &pricing);
        assert_eq!(above.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_totals_round_tax_to_cents() {
        let totals = OrderTotals::compute(dec(1999), &PricingConfig::default());
        assert_eq!(totals.tax, dec(160));
        assert_eq!(totals.total, dec(3158));
    }

    #[test]
    fn test_cart_summary_skips_unknown_products() {
        let store = DomainStore::open(MemoryStorage::new()).unwrap();
        let user = UserId::new("u");
        store.add_to_cart(&user, &ProductId::new("11"), 2).unwrap();
        store.add_to_cart(&user, &ProductId::new("999"), 1).unwrap();

        let checkout = CheckoutService::new(&store, Catalog::builtin(), PricingConfig::default());
        let summary = checkout.cart_summary(&user).unwrap();

        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.totals.subtotal, dec(13998));
        assert_eq!(summary.totals.total, dec(15118));
    }

    #[test]
    fn test_place_order_validates_form() {
        let store = DomainStore::open(MemoryStorage::new()).unwrap();
        let user = UserId::new("u");
        let checkout = CheckoutService::new(&store, Catalog::builtin(), PricingConfig::default());

        let mut missing_city = request();
        missing_city.shipping.city.clear();
        assert!(matches!(
            checkout.place_order(&user, &missing_city),
            Err(CheckoutError::MissingShipping)
        ));

        let mut missing_cvv = request();
        missing_cvv.payment.cvv = " ".to_owned();
        assert!(matches!(
            checkout.place_order(&user, &missing_cvv),
            Err(CheckoutError::MissingPayment)
        ));

        assert!(matches!(
            checkout.place_order(&user, &request()),
            Err(CheckoutError::EmptyCart)
        ));
        assert!(store.all_orders().unwrap().is_empty());
    }

    #[test]
    fn test_place_order() {
        let store = DomainStore::open(MemoryStorage::new()).unwrap();
        let user = UserId::new("u");
        store.add_to_cart(&user, &ProductId::new("10"), 1).unwrap();
        store.add_to_cart(&user, &ProductId::new("7"), 1).unwrap();

        let checkout = CheckoutService::new(&store, Catalog::builtin(), PricingConfig::default());
        let order = checkout.place_order(&user, &request()).unwrap();

        // 19.99 + 34.99 = 54.98, free shipping, tax 4.40
        assert_eq!(order.total, dec(5938));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.shipping_address, "123 Main St, Springfield, 12345");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].name, "Car Phone Mount");

        assert!(store.cart(&user).unwrap().is_empty());
        assert_eq!(store.user_orders(&user).unwrap(), vec![order.clone()]);

        let notifications = store.user_notifications(&user).unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Order);
        assert_eq!(
            notifications[0].message,
            format!("Your order #{} has been placed and is being processed.", order.id)
        );
    }

    #[test]
    fn test_shipping_prefill() {
        let [_, customer] = crate::seed::demo_users();
        let shipping = ShippingDetails::from_user(&customer);
        assert_eq!(shipping.name, "Demo Customer");
        assert_eq!(shipping.address, "123 Main St, City, State 12345");
        assert!(shipping.city.is_empty());
    }
}
