//! Cart repository.

use merchstand_core::CartItemId;

use super::RepositoryError;
use crate::models::CartItem;
use crate::storage::{KeyValueStore, get_json, keys, put_json};

/// Repository for the cart document.
pub struct CartRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All cart lines, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub fn items(&self) -> Result<Vec<CartItem>, RepositoryError> {
        Ok(get_json(self.store, keys::CART)?)
    }

    /// Append a line to the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a read or write fails.
    pub fn push(&self, item: &CartItem) -> Result<(), RepositoryError> {
        let mut items = self.items()?;
        items.push(item.clone());
        self.save(&items)
    }

    /// Remove a line by id. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a read or write fails.
    pub fn remove(&self, id: &CartItemId) -> Result<bool, RepositoryError> {
        let mut items = self.items()?;
        let before = items.len();
        items.retain(|item| &item.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save(&items)?;
        Ok(true)
    }

    /// Replace the entire cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn save(&self, items: &[CartItem]) -> Result<(), RepositoryError> {
        put_json(self.store, keys::CART, &items).map_err(RepositoryError::from)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.save(&[])
    }
}
