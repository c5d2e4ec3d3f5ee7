//! Shared helpers for the Merchstand integration tests.
//!
//! Tests drive the storefront through [`Shop`] exactly the way the CLI
//! does, so every scenario here exercises the real service wiring.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use merchstand_storefront::catalog::Product;
use merchstand_storefront::models::User;
use merchstand_storefront::shop::Shop;

/// A catalog product by id, panicking if the stock catalog lost it.
#[must_use]
pub fn product(shop: &Shop, id: u32) -> Product {
    shop.catalog()
        .get(merchstand_core::ProductId::new(id))
        .cloned()
        .unwrap()
}

/// Register (and thereby sign in) a standard test account.
#[must_use]
pub fn register(shop: &Shop, name: &str, email: &str) -> User {
    shop.accounts().register(name, email, "secret1").unwrap()
}
