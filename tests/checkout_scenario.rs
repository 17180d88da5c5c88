//! End-to-end checkout scenario.
//!
//! Walks the whole storefront path: seed a session, add two products to the
//! cart, enter checkout, select an address and cash-on-delivery, and place
//! the order through the simulated gateway. Expectations:
//!
//! - after the two adds: 3 units in the cart, ₹6,000 subtotal;
//! - the quote below the ₹10,000 free-shipping threshold carries the flat
//!   ₹500 fee and 18% GST (₹1,080 on ₹6,000);
//! - placing the order empties the cart, pushes exactly one new success
//!   notification embedding the total, and lands on `Confirmation`.

use std::time::Duration;

use testresult::TestResult;

use vitrine::{fixtures, prelude::*};

fn open_demo_store() -> Store {
    Store::open(
        fixtures::session_seed(),
        Box::new(MemoryStore::new()),
        Box::new(SilentToasts),
    )
}

fn add_demo_product(store: &mut Store, product: ProductId, quantity: u32) -> TestResult {
    let catalog = fixtures::demo_catalog();
    let product = catalog.by_id(product).ok_or("product missing from demo catalog")?;

    store.add_to_cart(product.cart_line(quantity));
    Ok(())
}

#[tokio::test]
async fn place_order_end_to_end() -> TestResult {
    let mut store = open_demo_store();
    let notifications_before = store.state().notifications.len();

    add_demo_product(&mut store, ProductId::new(1), 2)?; // ₹2,400 each
    add_demo_product(&mut store, ProductId::new(2), 1)?; // ₹1,200

    assert_eq!(store.cart_item_count(), 3);
    assert_eq!(store.cart_subtotal(), Price::new(6000));

    let mut flow = CheckoutFlow::begin(&store)?;

    // Address and payment guards hold until a selection is made.
    assert_eq!(flow.advance(), CheckoutStep::Address);
    flow.select_address("1");
    assert_eq!(flow.advance(), CheckoutStep::Payment);
    assert_eq!(flow.advance(), CheckoutStep::Payment);
    flow.select_payment(PaymentMethod::Cod);
    assert_eq!(flow.advance(), CheckoutStep::Review);

    let gateway = SimulatedGateway::with_latency(Duration::ZERO);
    let receipt = flow
        .place_order(&mut store, &gateway)
        .await
        .ok_or("expected a receipt from review")?;

    assert_eq!(receipt.quote.subtotal, Price::new(6000));
    assert_eq!(receipt.quote.tax, Price::new(1080));
    assert_eq!(receipt.quote.shipping, FLAT_SHIPPING_FEE);
    assert_eq!(receipt.quote.total, Price::new(7580));
    assert_eq!(receipt.payment_method, PaymentMethod::Cod);

    assert_eq!(flow.step(), CheckoutStep::Confirmation);
    assert!(store.state().cart.is_empty());

    let notifications = &store.state().notifications;
    assert_eq!(notifications.len(), notifications_before + 1);

    let newest = notifications.first().ok_or("expected a notification")?;
    assert_eq!(newest.severity, Severity::Success);
    assert!(!newest.is_read);
    assert_eq!(newest.action_ref.as_deref(), Some("/orders"));
    assert!(newest.message.contains("confirmed"));

    Ok(())
}

#[test]
fn cart_summary_and_checkout_agree_on_pricing() {
    let catalog = fixtures::demo_catalog();

    let lines: Vec<CartLine> = catalog.iter().map(|p| p.cart_line(1)).collect();

    // The cart page sums lines itself; checkout prices the same lines through
    // the quote. Both must see the same subtotal.
    let summed: Price = lines.iter().map(CartLine::line_total).sum();
    let quoted = quote(&lines);

    assert_eq!(quoted.subtotal, summed);
    assert_eq!(quoted.total, summed + quoted.tax + quoted.shipping);
}

#[test]
fn bulk_orders_ship_free() -> TestResult {
    let catalog = fixtures::demo_catalog();
    let rice = catalog
        .by_id(ProductId::new(1))
        .ok_or("product missing from demo catalog")?;

    // 4 × ₹2,400 = ₹9,600: below threshold.
    let below = quote(&[rice.cart_line(4)]);
    assert_eq!(below.shipping, FLAT_SHIPPING_FEE);

    // 5 × ₹2,400 = ₹12,000: free.
    let above = quote(&[rice.cart_line(5)]);
    assert_eq!(above.shipping, Price::ZERO);

    Ok(())
}

#[test]
fn empty_cart_cannot_enter_checkout() {
    let store = open_demo_store();

    assert_eq!(
        CheckoutFlow::begin(&store).err(),
        Some(CheckoutError::EmptyCart)
    );
}
