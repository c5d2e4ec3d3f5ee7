//! Cart commands.

use std::error::Error;

use merchstand_core::{CartItemId, ProductId, line_total};
use merchstand_storefront::shop::Shop;

/// Add a product to the cart.
pub fn add(
    shop: &Shop,
    product: u32,
    size: Option<&str>,
    quantity: u32,
    color: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let id = ProductId::new(product);
    let product = shop
        .catalog()
        .get(id)
        .ok_or_else(|| format!("no product with id {id}"))?
        .clone();

    let item = shop.cart().add(&product, size, quantity, color)?;
    println!(
        "Added {} x{} (size {}) - ${}",
        item.name,
        item.quantity,
        item.size,
        item.line_total()
    );
    Ok(())
}

/// Change a cart line's quantity.
pub fn set_quantity(shop: &Shop, line: &str, quantity: u32) -> Result<(), Box<dyn Error>> {
    match shop.cart().set_quantity(&CartItemId::new(line), quantity)? {
        Some(item) => println!("{} is now x{}.", item.name, item.quantity),
        None => println!("No cart line with id {line}."),
    }
    Ok(())
}

/// Remove a cart line by id.
pub fn remove(shop: &Shop, line: &str) -> Result<(), Box<dyn Error>> {
    if shop.cart().remove(&CartItemId::new(line))? {
        println!("Removed.");
    } else {
        println!("No cart line with id {line}.");
    }
    Ok(())
}

/// Show the cart contents.
pub fn list(shop: &Shop) -> Result<(), Box<dyn Error>> {
    let cart = shop.cart();
    let items = cart.items()?;
    if items.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }
    for item in &items {
        println!(
            "  {}  {} x{} (size {}{}) - ${}",
            item.id,
            item.name,
            item.quantity,
            item.size,
            item.color
                .as_deref()
                .map(|c| format!(", {c}"))
                .unwrap_or_default(),
            line_total(item.price, item.quantity)
        );
    }
    println!("{} item(s), subtotal ${}", cart.count()?, cart.total()?);
    Ok(())
}

/// Empty the cart.
pub fn clear(shop: &Shop) -> Result<(), Box<dyn Error>> {
    shop.cart().clear()?;
    println!("Cart cleared.");
    Ok(())
}
