//! Cart operations.
//!
//! Each add creates its own cart line; two adds of the same product do
//! not merge. Lines snapshot the product's name, price and image so a
//! later catalog change never alters a cart already in progress.

use rust_decimal::Decimal;

use merchstand_core::{CartItemId, line_total};

use crate::catalog::Product;
use crate::error::{AppError, Result};
use crate::events::{EventBus, StoreEvent};
use crate::models::CartItem;
use crate::repo::CartRepository;
use crate::storage::KeyValueStore;

/// Largest quantity accepted for a single cart line.
pub const MAX_QUANTITY: u32 = 10;

/// Fallback size when a product somehow lists none.
const DEFAULT_SIZE: &str = "M";

/// Service for the shopping cart.
pub struct CartService<'a> {
    cart: CartRepository<'a>,
    events: &'a EventBus,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore, events: &'a EventBus) -> Self {
        Self {
            cart: CartRepository::new(store),
            events,
        }
    }

    /// Add a product to the cart as a new line.
    ///
    /// `size` defaults to the product's first listed size and `color`
    /// to its first listed color (if it has colors at all).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the quantity is outside
    /// `1..=MAX_QUANTITY` or the size is not offered for this product.
    pub fn add(
        &self,
        product: &Product,
        size: Option<&str>,
        quantity: u32,
        color: Option<&str>,
    ) -> Result<CartItem> {
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(AppError::Validation(format!(
                "quantity must be between 1 and {MAX_QUANTITY}"
            )));
        }

        let size = match size {
            Some(size) => {
                if !product.sizes.iter().any(|s| s == size) {
                    return Err(AppError::Validation(format!(
                        "size `{size}` is not offered for {}",
                        product.name
                    )));
                }
                size.to_owned()
            }
            None => product
                .sizes
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_SIZE.to_owned()),
        };

        let color = match color {
            Some(color) => {
                if !product.colors.iter().any(|c| c == color) {
                    return Err(AppError::Validation(format!(
                        "color `{color}` is not offered for {}",
                        product.name
                    )));
                }
                Some(color.to_owned())
            }
            None => product.colors.first().cloned(),
        };

        let item = CartItem {
            id: CartItemId::generate(),
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            size,
            quantity,
            color,
        };
        self.cart.push(&item)?;
        self.events.emit(&StoreEvent::CartUpdated);
        Ok(item)
    }

    /// Change a cart line's quantity. Returns the updated line, or
    /// `None` if no line has this id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the quantity is outside
    /// `1..=MAX_QUANTITY`.
    pub fn set_quantity(&self, id: &CartItemId, quantity: u32) -> Result<Option<CartItem>> {
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(AppError::Validation(format!(
                "quantity must be between 1 and {MAX_QUANTITY}"
            )));
        }
        let mut items = self.cart.items()?;
        let Some(item) = items.iter_mut().find(|item| &item.id == id) else {
            return Ok(None);
        };
        item.quantity = quantity;
        let updated = item.clone();
        self.cart.save(&items)?;
        self.events.emit(&StoreEvent::CartUpdated);
        Ok(Some(updated))
    }

    /// Remove a cart line by id. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if a read or write fails.
    pub fn remove(&self, id: &CartItemId) -> Result<bool> {
        let removed = self.cart.remove(id)?;
        if removed {
            self.events.emit(&StoreEvent::CartUpdated);
        }
        Ok(removed)
    }

    /// All cart lines, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn items(&self) -> Result<Vec<CartItem>> {
        Ok(self.cart.items()?)
    }

    /// Total number of units in the cart (quantities summed).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn count(&self) -> Result<u32> {
        Ok(self.cart.items()?.iter().map(|item| item.quantity).sum())
    }

    /// Sum of line totals, unrounded.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn total(&self) -> Result<Decimal> {
        Ok(self
            .cart
            .items()?
            .iter()
            .map(|item| line_total(item.price, item.quantity))
            .sum())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the write fails.
    pub fn clear(&self) -> Result<()> {
        self.cart.clear()?;
        self.events.emit(&StoreEvent::CartUpdated);
        Ok(())
    }
}
