//! Catalog browsing.

use tracing::{info, warn};

use brightbuy_core::Price;
use brightbuy_storefront::Catalog;
use brightbuy_storefront::catalog::ALL_CATEGORIES;

/// List products matching a category and search query.
pub fn products(category: Option<&str>, query: &str, featured_only: bool) {
    let catalog = Catalog::builtin();

    if let Some(category) = category {
        if category != ALL_CATEGORIES && !Catalog::categories().contains(&category) {
            warn!(
                "Unknown category `{category}`; choose from {}",
                Catalog::categories().join(", ")
            );
        }
    }

    let matches: Vec<_> = catalog
        .filter(category, query)
        .into_iter()
        .filter(|p| !featured_only || p.featured)
        .collect();

    if matches.is_empty() {
        info!("No products found");
        return;
    }

    for product in matches {
        let sale = match (product.original_price, product.discount_percent()) {
            (Some(original), Some(percent)) => {
                format!(" (was {}, -{percent}%)", Price::usd(original))
            }
            _ => String::new(),
        };
        info!(
            "[{:>2}] {} - {}{sale} | {} | {:.1}/5 from {} reviews",
            product.id,
            product.name,
            Price::usd(product.price),
            product.category,
            product.rating,
            product.reviews
        );
    }
}
