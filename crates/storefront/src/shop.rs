//! The shop composition root.
//!
//! [`Shop`] wires the storage backend, event bus, catalog and pricing
//! config together and hands out services on demand. It is cheap to
//! clone and safe to share across threads; clones see the same store
//! and event bus.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::events::EventBus;
use crate::services::{
    AccountService, CartService, CheckoutService, InboxService, OrderLedger, ProfileService,
};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// The assembled storefront.
#[derive(Debug, Clone)]
pub struct Shop {
    inner: Arc<ShopInner>,
}

struct ShopInner {
    config: StorefrontConfig,
    store: Box<dyn KeyValueStore>,
    events: EventBus,
    catalog: Catalog,
}

impl Shop {
    /// Assemble a shop over an explicit storage backend.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(ShopInner {
                config,
                store,
                events: EventBus::new(),
                catalog: Catalog::standard(),
            }),
        }
    }

    /// Open a shop backed by files in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the data directory cannot be
    /// created.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let store = FileStore::open(config.data_dir.clone())?;
        Ok(Self::new(config, Box::new(store)))
    }

    /// A shop with in-memory storage, mainly for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(StorefrontConfig::default(), Box::new(MemoryStore::new()))
    }

    /// The shop configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The event bus shared by all services of this shop.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Raw access to the storage backend.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Account registration, sign-in and password management.
    #[must_use]
    pub fn accounts(&self) -> AccountService<'_> {
        AccountService::new(self.store(), &self.inner.events)
    }

    /// Profile and address book management.
    #[must_use]
    pub fn profile(&self) -> ProfileService<'_> {
        ProfileService::new(self.store())
    }

    /// The shopping cart.
    #[must_use]
    pub fn cart(&self) -> CartService<'_> {
        CartService::new(self.store(), &self.inner.events)
    }

    /// The order ledger.
    #[must_use]
    pub fn ledger(&self) -> OrderLedger<'_> {
        OrderLedger::new(self.store(), &self.inner.events, self.inner.config.pricing)
    }

    /// Per-customer inboxes.
    #[must_use]
    pub fn inbox(&self) -> InboxService<'_> {
        InboxService::new(self.store())
    }

    /// Checkout.
    #[must_use]
    pub fn checkout(&self) -> CheckoutService<'_> {
        CheckoutService::new(self.store(), &self.inner.events, self.inner.config.pricing)
    }
}

impl std::fmt::Debug for ShopInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopInner")
            .field("config", &self.config)
            .field("events", &self.events)
            .field("catalog_len", &self.catalog.all().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let shop = Shop::in_memory();
        let clone = shop.clone();

        shop.accounts()
            .register("Ada", "ada@example.com", "secret1")
            .unwrap();
        assert!(clone.accounts().is_logged_in().unwrap());
    }

    #[test]
    fn test_catalog_is_loaded() {
        let shop = Shop::in_memory();
        assert!(!shop.catalog().all().is_empty());
    }
}
