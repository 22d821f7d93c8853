//! Static product catalog.
//!
//! The catalog is read-only reference data. The store never consults it;
//! checkout and the front end join cart and order lines against it by
//! product id.

use std::sync::LazyLock;

use rust_decimal::Decimal;

use brightbuy_core::ProductId;

use crate::models::Product;

/// Category filter value that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Browsable categories, in display order.
pub const CATEGORIES: [&str; 8] = [
    "Electronics",
    "Fashion",
    "Home & Kitchen",
    "Books",
    "Sports",
    "Beauty",
    "Toys",
    "Automotive",
];

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(builtin_products()));

/// An in-memory list of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's built-in catalog.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look a product up by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products flagged for the home page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Browsable categories, in display order.
    #[must_use]
    pub const fn categories() -> &'static [&'static str] {
        &CATEGORIES
    }

    /// Products in `category` (or any category for `None` / `"All"`) whose
    /// name or description contains `query`, ignoring case. An empty query
    /// matches everything.
    #[must_use]
    pub fn filter(&self, category: Option<&str>, query: &str) -> Vec<&Product> {
        let category = category.filter(|c| *c != ALL_CATEGORIES);
        let needle = query.trim().to_lowercase();

        self.products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    original_cents: Option<i64>,
    category: &str,
    rating: f32,
    reviews: u32,
    featured: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::new(price_cents, 2),
        original_price: original_cents.map(|c| Decimal::new(c, 2)),
        category: category.to_owned(),
        rating,
        reviews,
        in_stock: true,
        featured,
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Wireless Noise-Cancelling Headphones",
            "Premium over-ear headphones with active noise cancellation, 30-hour battery life, and exceptional sound quality.",
            29999,
            Some(39999),
            "Electronics",
            4.8,
            2547,
            true,
        ),
        product(
            "2",
            "Smart Fitness Watch",
            "Track your health and fitness with this advanced smartwatch featuring heart rate monitoring, GPS, and sleep tracking.",
            24999,
            None,
            "Electronics",
            4.6,
            1823,
            true,
        ),
        product(
            "3",
            "4K Ultra HD Smart TV 55\"",
            "Immersive viewing experience with stunning 4K resolution, HDR support, and built-in streaming apps.",
            79999,
            Some(99999),
            "Electronics",
            4.7,
            3421,
            true,
        ),
        product(
            "4",
            "Premium Leather Jacket",
            "Genuine leather jacket with modern styling, perfect for any season. Available in multiple colors.",
            19999,
            None,
            "Fashion",
            4.5,
            892,
            false,
        ),
        product(
            "5",
            "Stainless Steel Coffee Maker",
            "Programmable coffee maker with thermal carafe, brew strength control, and auto shut-off feature.",
            8999,
            Some(12999),
            "Home & Kitchen",
            4.4,
            1567,
            false,
        ),
        product(
            "6",
            "Bestselling Novel Collection",
            "Set of 5 award-winning contemporary novels from bestselling authors. Perfect gift for book lovers.",
            5999,
            None,
            "Books",
            4.9,
            4523,
            false,
        ),
        product(
            "7",
            "Yoga Mat with Carrying Strap",
            "Extra thick, non-slip yoga mat made from eco-friendly materials. Ideal for all types of yoga and exercise.",
            3499,
            None,
            "Sports",
            4.6,
            2134,
            false,
        ),
        product(
            "8",
            "Organic Skincare Gift Set",
            "Luxurious 6-piece skincare set with natural ingredients. Includes cleanser, toner, serum, and moisturizer.",
            7999,
            None,
            "Beauty",
            4.7,
            1892,
            false,
        ),
        product(
            "9",
            "Building Blocks Set - 1000 Pieces",
            "Creative building set with 1000 colorful pieces. Encourages imagination and develops motor skills.",
            4999,
            None,
            "Toys",
            4.8,
            3245,
            false,
        ),
        product(
            "10",
            "Car Phone Mount",
            "Universal dashboard and windshield mount with 360-degree rotation and one-touch release.",
            1999,
            None,
            "Automotive",
            4.3,
            987,
            false,
        ),
        product(
            "11",
            "Wireless Gaming Mouse",
            "High-precision wireless gaming mouse with customizable RGB lighting and programmable buttons.",
            6999,
            None,
            "Electronics",
            4.7,
            1456,
            false,
        ),
        product(
            "12",
            "Designer Sunglasses",
            "Polarized UV protection sunglasses with premium frame and scratch-resistant lenses.",
            15999,
            Some(24999),
            "Fashion",
            4.5,
            734,
            false,
        ),
    ]
}
