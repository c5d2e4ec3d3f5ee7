//! Order commands.

use std::error::Error;

use merchstand_core::{OrderId, OrderStatus};
use merchstand_storefront::models::Order;
use merchstand_storefront::shop::Shop;

/// List orders, newest first.
pub fn list(shop: &Shop, status: Option<&str>, mine: bool) -> Result<(), Box<dyn Error>> {
    let ledger = shop.ledger();
    let mut orders = ledger.sorted_by_date()?;

    if let Some(status) = status {
        let status: OrderStatus = status.parse()?;
        orders.retain(|o| o.status == status);
    }
    if mine {
        let user = shop
            .accounts()
            .current_user()?
            .ok_or("not signed in; sign in or drop --mine")?;
        orders.retain(|o| o.email == user.email);
    }

    if orders.is_empty() {
        println!("No orders.");
        return Ok(());
    }
    for order in &orders {
        print_row(order);
    }
    Ok(())
}

/// Show one order in full.
pub fn show(shop: &Shop, id: &str) -> Result<(), Box<dyn Error>> {
    let id = OrderId::parse(id)?;
    let order = shop
        .ledger()
        .get(&id)?
        .ok_or_else(|| format!("no order with id {id}"))?;

    println!("{} ({})", order.order_id, order.status);
    println!("  Placed:  {}", order.order_date.format("%Y-%m-%d %H:%M"));
    println!("  Updated: {}", order.updated_at.format("%Y-%m-%d %H:%M"));
    println!("  Customer: {} <{}>", order.full_name, order.email);
    println!(
        "  Ship to: {}, {}, {} {}, {}",
        order.shipping.address,
        order.shipping.city,
        order.shipping.state,
        order.shipping.zip,
        order.shipping.country
    );
    println!("  Items:");
    for item in &order.items {
        println!(
            "    {} x{} (size {}) - ${}",
            item.name,
            item.quantity,
            item.size,
            merchstand_core::line_total(item.price, item.quantity)
        );
    }
    println!(
        "  Totals: ${} + ${} shipping + ${} tax = ${}",
        order.totals.subtotal, order.totals.shipping, order.totals.tax, order.totals.total
    );
    Ok(())
}

/// Set an order's status.
pub fn set_status(shop: &Shop, id: &str, status: &str) -> Result<(), Box<dyn Error>> {
    let id = OrderId::parse(id)?;
    let status: OrderStatus = status.parse()?;
    match shop.ledger().update_status(&id, status)? {
        Some(order) => println!("{} is now {}.", order.order_id, order.status),
        None => println!("No order with id {id}."),
    }
    Ok(())
}

/// Spending statistics for the signed-in user.
pub fn stats(shop: &Shop) -> Result<(), Box<dyn Error>> {
    let user = shop
        .accounts()
        .current_user()?
        .ok_or("not signed in")?;
    let stats = shop.ledger().user_statistics(&user.email)?;

    println!("Orders for {}:", user.email);
    println!("  Total orders:  {}", stats.total_orders);
    println!("  Total spent:   ${}", stats.total_spent);
    println!("  Average order: ${}", stats.average_order_value);
    println!("  By status:");
    for (status, count) in &stats.status_counts {
        println!("    {status:<12} {count}");
    }
    Ok(())
}

fn print_row(order: &Order) {
    println!(
        "  {}  {}  {:<10}  ${:>8}  {}",
        order.order_id,
        order.order_date.format("%Y-%m-%d"),
        order.status.to_string(),
        order.totals.total,
        order.email
    );
}
