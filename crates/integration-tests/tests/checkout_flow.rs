//! End-to-end checkout: browse, fill a cart, place the order, then
//! verify the ledger entry, the emptied cart and the confirmation
//! message all line up.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use merchstand_core::OrderStatus;
use merchstand_integration_tests::{product, register};
use merchstand_storefront::events::StoreEvent;
use merchstand_storefront::services::CheckoutForm;
use merchstand_storefront::shop::Shop;
use rust_decimal::dec;

fn checkout_form(email: &str) -> CheckoutForm {
    CheckoutForm {
        full_name: "Ada Lovelace".to_owned(),
        email: email.to_owned(),
        address: "1 Analytical Way".to_owned(),
        city: "London".to_owned(),
        state: "LN".to_owned(),
        zip: "SW1A 1AA".to_owned(),
        country: "UK".to_owned(),
        phone: None,
    }
}

// ============================================================================
// Signed-in checkout
// ============================================================================

#[test]
fn test_signed_in_checkout_end_to_end() {
    let shop = Shop::in_memory();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    shop.events()
        .subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let user = register(&shop, "Ada", "ada@example.com");

    // Two shirts at 29.99 plus a 19.99 poster.
    let shirt = product(&shop, 1);
    let poster = product(&shop, 2);
    shop.cart().add(&shirt, Some("L"), 2, None).unwrap();
    shop.cart().add(&poster, None, 1, None).unwrap();
    assert_eq!(shop.cart().count().unwrap(), 3);

    // The form email is deliberately wrong; the account email must win.
    let order = shop
        .checkout()
        .place_order(&checkout_form("someone-else@example.com"))
        .unwrap();

    assert_eq!(order.email, user.email);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.totals.subtotal, dec!(79.97));
    assert_eq!(order.totals.shipping, dec!(5.00));
    assert_eq!(order.totals.tax, dec!(8.00));
    assert_eq!(order.totals.total, dec!(92.97));

    // Ledger has it, cart is empty.
    let ledger_copy = shop.ledger().get(&order.order_id).unwrap().unwrap();
    assert_eq!(ledger_copy.items.len(), 2);
    assert!(shop.cart().items().unwrap().is_empty());

    // Confirmation message, newest first.
    let messages = shop.inbox().messages(&user.email).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0].subject,
        format!("Order Confirmation - {}", order.order_id)
    );
    assert_eq!(
        messages[0].preview,
        "Thank you for your order! Total: $92.97"
    );

    // Event stream saw the full journey.
    let events = events.lock().unwrap();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, StoreEvent::UserLogin { .. }))
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, StoreEvent::OrderCreated { order_id } if *order_id == order.order_id))
    );
    // CartUpdated from both adds and the post-checkout clear.
    assert!(
        events
            .iter()
            .filter(|e| matches!(e, StoreEvent::CartUpdated))
            .count()
            >= 3
    );
}

// ============================================================================
// Guest checkout
// ============================================================================

#[test]
fn test_guest_checkout_uses_form_email() {
    let shop = Shop::in_memory();
    let shirt = product(&shop, 1);
    shop.cart().add(&shirt, Some("M"), 2, None).unwrap();

    let order = shop
        .checkout()
        .place_order(&checkout_form("guest@example.com"))
        .unwrap();

    assert_eq!(order.email.as_str(), "guest@example.com");
    assert_eq!(order.totals.subtotal, dec!(59.98));
    assert_eq!(order.totals.tax, dec!(6.00));
    assert_eq!(order.totals.total, dec!(70.98));

    let email = merchstand_core::Email::parse("guest@example.com").unwrap();
    assert_eq!(shop.inbox().messages(&email).unwrap().len(), 1);
}

#[test]
fn test_failed_checkout_leaves_cart_intact() {
    let shop = Shop::in_memory();
    let shirt = product(&shop, 1);
    shop.cart().add(&shirt, Some("M"), 1, None).unwrap();

    let mut bad_form = checkout_form("guest@example.com");
    bad_form.zip = String::new();
    assert!(shop.checkout().place_order(&bad_form).is_err());
    assert_eq!(shop.cart().items().unwrap().len(), 1);
}

#[test]
fn test_checkout_with_empty_cart_fails() {
    let shop = Shop::in_memory();
    assert!(
        shop.checkout()
            .place_order(&checkout_form("guest@example.com"))
            .is_err()
    );
    // No stray confirmation message either.
    let email = merchstand_core::Email::parse("guest@example.com").unwrap();
    assert!(shop.inbox().messages(&email).unwrap().is_empty());
}

// ============================================================================
// Prefill
// ============================================================================

#[test]
fn test_checkout_prefill_from_default_address() {
    let shop = Shop::in_memory();
    register(&shop, "Ada", "ada@example.com");

    let saved = shop
        .profile()
        .add_address(merchstand_storefront::services::AddressInput {
            name: "Ada Lovelace".to_owned(),
            address: "1 Analytical Way".to_owned(),
            city: "London".to_owned(),
            state: "LN".to_owned(),
            zip: "SW1A 1AA".to_owned(),
            country: "UK".to_owned(),
            phone: Some("555-0100".to_owned()),
            make_default: true,
        })
        .unwrap();

    let prefill = shop.checkout().prefill().unwrap();
    assert_eq!(prefill.full_name.as_deref(), Some("Ada"));
    assert_eq!(prefill.email.unwrap().as_str(), "ada@example.com");
    let address = prefill.address.unwrap();
    assert_eq!(address.id, saved.id);
    assert_eq!(address.phone.as_deref(), Some("555-0100"));
}
