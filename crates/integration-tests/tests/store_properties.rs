//! Store contract exercised against a real storage file.

use chrono::Utc;
use rust_decimal::Decimal;

use brightbuy_core::{OrderId, OrderStatus, ProductId};
use brightbuy_integration_tests::{TestContext, TestResult};
use brightbuy_storefront::models::{Order, OrderItem};
use brightbuy_storefront::services::AuthService;

fn item(product: &str, name: &str, cents: i64, quantity: u32) -> OrderItem {
    OrderItem {
        product_id: ProductId::new(product),
        name: name.to_owned(),
        price: Decimal::new(cents, 2),
        quantity,
    }
}

#[test]
fn test_register_cart_order_scenario() -> TestResult {
    let mut ctx = TestContext::new()?;
    let user = AuthService::new(&mut ctx.store).register("a@b.com", "secret1", "A")?;
    let store = &ctx.store;

    store.add_to_cart(&user.id, &ProductId::new("1"), 2)?;
    store.add_to_cart(&user.id, &ProductId::new("2"), 1)?;

    let items: Vec<_> = store
        .cart(&user.id)?
        .into_iter()
        .map(|line| item(line.product_id.as_str(), "Item", 1000, line.quantity))
        .collect();
    let order = Order {
        id: OrderId::new(store.next_id()),
        user_id: user.id.clone(),
        total: items.iter().map(OrderItem::line_total).sum(),
        items,
        status: OrderStatus::Pending,
        shipping_address: "1 Test Way, Testville, 00000".to_owned(),
        created_at: Utc::now(),
    };
    store.create_order(&order)?;
    store.clear_cart(&user.id)?;

    assert!(store.cart(&user.id)?.is_empty());
    let orders = store.user_orders(&user.id)?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].items.len(), 2);
    assert_eq!(orders[0], order);
    assert_eq!(store.all_orders()?.len(), 1);
    Ok(())
}

#[test]
fn test_cart_lines_merge_and_stay_put() -> TestResult {
    let (ctx, user) = TestContext::signed_in("demo@example.com")?;
    let store = &ctx.store;
    let headphones = ProductId::new("1");

    assert!(!store.remove_from_cart(&user.id, &headphones)?);
    assert!(store.cart(&user.id)?.is_empty());

    store.add_to_cart(&user.id, &headphones, 1)?;
    store.add_to_cart(&user.id, &headphones, 1)?;
    let cart = store.cart(&user.id)?;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 2);

    assert!(!store.update_cart_quantity(&user.id, &ProductId::new("9"), 4)?);
    assert_eq!(store.cart(&user.id)?, cart);
    Ok(())
}

#[test]
fn test_status_update_touches_only_status() -> TestResult {
    let (ctx, user) = TestContext::signed_in("demo@example.com")?;
    let store = &ctx.store;

    let order = Order {
        id: OrderId::new("1000"),
        user_id: user.id,
        items: vec![item("3", "Organic Cotton T-Shirt", 2999, 3)],
        total: Decimal::new(8997, 2),
        status: OrderStatus::Pending,
        shipping_address: "123 Main St".to_owned(),
        created_at: Utc::now(),
    };
    store.create_order(&order)?;

    assert!(!store.update_order_status(&OrderId::new("missing"), OrderStatus::Shipped)?);
    assert_eq!(store.all_orders()?, vec![order.clone()]);

    assert!(store.update_order_status(&order.id, OrderStatus::Shipped)?);
    let stored = store.all_orders()?.remove(0);
    assert_eq!(stored.status, OrderStatus::Shipped);
    assert_eq!(
        Order {
            status: OrderStatus::Pending,
            ..stored
        },
        order
    );
    Ok(())
}

#[test]
fn test_demo_data_is_idempotent() -> TestResult {
    let ctx = TestContext::new()?;
    assert!(ctx.store.initialize_demo_data()?);
    let first = ctx.store.all_users()?;

    assert!(!ctx.store.initialize_demo_data()?);
    assert_eq!(ctx.store.all_users()?, first);
    assert_eq!(first.len(), 2);
    Ok(())
}
