//! Order repository.

use chrono::{DateTime, Utc};

use merchstand_core::{Email, OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::Order;
use crate::storage::{KeyValueStore, get_json, keys, put_json};

/// Repository for the order ledger.
pub struct OrderRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All orders, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub fn all(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(get_json(self.store, keys::ORDERS)?)
    }

    /// Append an order to the ledger.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn append(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.all()?;
        orders.push(order.clone());
        put_json(self.store, keys::ORDERS, &orders)
            .map_err(RepositoryError::from)
    }

    /// Look up an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub fn find(&self, order_id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.all()?.into_iter().find(|o| &o.order_id == order_id))
    }

    /// Set an order's status and bump its `updated_at`.
    ///
    /// Returns the updated order, or `None` if no order has this id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a read or write fails.
    pub fn update_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut orders = self.all()?;
        let Some(order) = orders.iter_mut().find(|o| &o.order_id == order_id) else {
            return Ok(None);
        };
        order.status = status;
        order.updated_at = at;
        let updated = order.clone();
        put_json(self.store, keys::ORDERS, &orders)?;
        Ok(Some(updated))
    }

    /// Remove an order. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a read or write fails.
    pub fn delete(&self, order_id: &OrderId) -> Result<bool, RepositoryError> {
        let mut orders = self.all()?;
        let before = orders.len();
        orders.retain(|o| &o.order_id != order_id);
        if orders.len() == before {
            return Ok(false);
        }
        put_json(self.store, keys::ORDERS, &orders)?;
        Ok(true)
    }

    /// Wipe the whole ledger.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        put_json(self.store, keys::ORDERS, &Vec::<Order>::new())
            .map_err(RepositoryError::from)
    }

    /// Relink every order under `old` to `new`. Returns the number of
    /// orders rewritten.
    ///
    /// Used when a customer changes their account email so their
    /// history follows them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a read or write fails.
    pub fn reassign_email(&self, old: &Email, new: &Email) -> Result<usize, RepositoryError> {
        let mut orders = self.all()?;
        let mut moved = 0;
        for order in &mut orders {
            if &order.email == old {
                order.email = new.clone();
                moved += 1;
            }
        }
        if moved > 0 {
            put_json(self.store, keys::ORDERS, &orders)?;
        }
        Ok(moved)
    }
}
