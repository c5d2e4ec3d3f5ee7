//! Checkout command.

use std::error::Error;

use merchstand_storefront::services::CheckoutForm;
use merchstand_storefront::shop::Shop;

/// Form fields given on the command line. Anything omitted is filled
/// from the signed-in user's profile and default address.
#[derive(Debug, Default)]
pub struct FormOverrides {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

/// Place an order for the current cart contents.
pub fn place(shop: &Shop, overrides: FormOverrides) -> Result<(), Box<dyn Error>> {
    let checkout = shop.checkout();
    let prefill = checkout.prefill()?;
    let default_address = prefill.address;

    let pick = |given: Option<String>, saved: Option<String>| given.or(saved).unwrap_or_default();

    let form = CheckoutForm {
        full_name: pick(overrides.name, prefill.full_name),
        email: pick(
            overrides.email,
            prefill.email.map(|e| e.as_str().to_owned()),
        ),
        address: pick(
            overrides.address,
            default_address.as_ref().map(|a| a.address.clone()),
        ),
        city: pick(
            overrides.city,
            default_address.as_ref().map(|a| a.city.clone()),
        ),
        state: pick(
            overrides.state,
            default_address.as_ref().map(|a| a.state.clone()),
        ),
        zip: pick(
            overrides.zip,
            default_address.as_ref().map(|a| a.zip.clone()),
        ),
        country: pick(
            overrides.country,
            default_address.as_ref().map(|a| a.country.clone()),
        ),
        phone: overrides
            .phone
            .or_else(|| default_address.as_ref().and_then(|a| a.phone.clone())),
    };

    let order = checkout.place_order(&form)?;
    println!("Order placed: {}", order.order_id);
    println!("  Subtotal: ${}", order.totals.subtotal);
    println!("  Shipping: ${}", order.totals.shipping);
    println!("  Tax:      ${}", order.totals.tax);
    println!("  Total:    ${}", order.totals.total);
    println!("A confirmation message is in the inbox for {}.", order.email);
    Ok(())
}
