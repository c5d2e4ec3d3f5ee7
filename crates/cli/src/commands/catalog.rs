//! Catalog browsing commands.

use std::error::Error;

use merchstand_core::ProductId;
use merchstand_storefront::catalog::{Category, Product, ProductFilter, SortKey};
use merchstand_storefront::shop::Shop;
use rust_decimal::Decimal;

/// List products matching the given filters.
pub fn list(
    shop: &Shop,
    search: Option<String>,
    categories: &[String],
    max_price: Option<String>,
    sort: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let categories = categories
        .iter()
        .map(|c| c.parse::<Category>())
        .collect::<Result<Vec<_>, _>>()?;
    let max_price = max_price
        .map(|p| p.parse::<Decimal>())
        .transpose()
        .map_err(|e| format!("invalid --max-price: {e}"))?;
    let sort = sort.as_deref().map(parse_sort).transpose()?;

    let filter = ProductFilter {
        search,
        categories,
        max_price,
        sort,
    };
    let matches = shop.catalog().search(&filter);
    if matches.is_empty() {
        println!("No products match.");
        return Ok(());
    }
    for product in matches {
        print_row(product);
    }
    Ok(())
}

/// Show one product in full, with its related products.
pub fn show(shop: &Shop, id: u32) -> Result<(), Box<dyn Error>> {
    let id = ProductId::new(id);
    let product = shop
        .catalog()
        .get(id)
        .ok_or_else(|| format!("no product with id {id}"))?;

    println!("{} (#{})", product.name, product.id);
    println!("  Category: {}", product.category);
    if product.has_discount() {
        println!("  Price:    ${} (was ${})", product.price, product.original_price);
    } else {
        println!("  Price:    ${}", product.price);
    }
    println!("  Sizes:    {}", product.sizes.join(", "));
    if !product.colors.is_empty() {
        println!("  Colors:   {}", product.colors.join(", "));
    }

    let related = shop.catalog().related(id);
    if !related.is_empty() {
        println!("\nYou may also like:");
        for product in related {
            print_row(product);
        }
    }
    Ok(())
}

/// List the featured products.
pub fn featured(shop: &Shop) {
    for product in shop.catalog().featured() {
        print_row(product);
    }
}

fn print_row(product: &Product) {
    println!(
        "  #{:<3} {:<28} ${:>6}  [{}]",
        product.id, product.name, product.price, product.category
    );
}

fn parse_sort(value: &str) -> Result<SortKey, Box<dyn Error>> {
    match value {
        "price-low" => Ok(SortKey::PriceLowToHigh),
        "price-high" => Ok(SortKey::PriceHighToLow),
        "name-asc" => Ok(SortKey::NameAsc),
        "name-desc" => Ok(SortKey::NameDesc),
        other => Err(format!(
            "unknown sort `{other}`; must be one of: price-low, price-high, name-asc, name-desc"
        )
        .into()),
    }
}
