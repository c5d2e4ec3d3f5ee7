//! The order ledger.
//!
//! Owns order creation (including the totals contract and order id
//! generation), status transitions and reporting queries.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use merchstand_core::{Email, OrderId, OrderStatus, line_total, round2};

use crate::config::PricingConfig;
use crate::error::{AppError, Result};
use crate::events::{EventBus, StoreEvent};
use crate::models::{Order, OrderItem, OrderStatistics, OrderTotals, ShippingDetails};
use crate::repo::OrderRepository;
use crate::storage::KeyValueStore;

/// Attempts to draw an unused order-id suffix before giving up.
const ORDER_ID_ATTEMPTS: usize = 32;

/// Input for [`OrderLedger::create_order`].
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub email: Email,
    pub full_name: String,
    pub shipping: ShippingDetails,
    pub items: Vec<OrderItem>,
}

/// Service for the order ledger.
pub struct OrderLedger<'a> {
    orders: OrderRepository<'a>,
    events: &'a EventBus,
    pricing: PricingConfig,
}

impl<'a> OrderLedger<'a> {
    /// Create a new order ledger.
    #[must_use]
    pub const fn new(
        store: &'a dyn KeyValueStore,
        events: &'a EventBus,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            orders: OrderRepository::new(store),
            events,
            pricing,
        }
    }

    /// Compute totals for a set of items.
    ///
    /// The subtotal stays unrounded; the tax is rounded before it
    /// enters the total, so the stored parts always sum exactly.
    #[must_use]
    pub fn totals_for(&self, items: &[OrderItem]) -> OrderTotals {
        let subtotal: Decimal = items
            .iter()
            .map(|item| line_total(item.price, item.quantity))
            .sum();
        let shipping = self.pricing.shipping_fee;
        let tax = round2(subtotal * self.pricing.tax_rate);
        let total = round2(subtotal + shipping + tax);
        OrderTotals {
            subtotal,
            shipping,
            tax,
            total,
        }
    }

    /// Create an order and append it to the ledger.
    ///
    /// The order starts [`OrderStatus::Pending`] with `order_date` and
    /// `updated_at` set to now.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if `items` is empty.
    pub fn create_order(&self, new_order: NewOrder) -> Result<Order> {
        if new_order.items.is_empty() {
            return Err(AppError::Validation(
                "order must contain at least one item".to_owned(),
            ));
        }

        let totals = self.totals_for(&new_order.items);
        let now = Utc::now();
        let order = Order {
            order_id: self.generate_order_id(now)?,
            email: new_order.email,
            full_name: new_order.full_name,
            shipping: new_order.shipping,
            items: new_order.items,
            totals,
            status: OrderStatus::Pending,
            order_date: now,
            updated_at: now,
        };

        self.orders.append(&order)?;
        self.events.emit(&StoreEvent::OrderCreated {
            order_id: order.order_id.clone(),
        });
        tracing::info!(order_id = %order.order_id, total = %order.totals.total, "order created");
        Ok(order)
    }

    /// Generate an order id that is not already in the ledger.
    ///
    /// Ids embed the timestamp down to the second plus a random 4-digit
    /// suffix; a colliding suffix is re-drawn up to [`ORDER_ID_ATTEMPTS`]
    /// times before the operation fails.
    fn generate_order_id(&self, at: DateTime<Utc>) -> Result<OrderId> {
        let taken: HashSet<OrderId> = self
            .orders
            .all()?
            .into_iter()
            .map(|o| o.order_id)
            .collect();
        let mut rng = rand::rng();
        for _ in 0..ORDER_ID_ATTEMPTS {
            let suffix = rng.random_range(0..10_000u16);
            let id = OrderId::from_parts(at.naive_utc(), suffix);
            if !taken.contains(&id) {
                return Ok(id);
            }
        }
        Err(AppError::OrderIdExhausted(ORDER_ID_ATTEMPTS))
    }

    /// All orders, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn all_orders(&self) -> Result<Vec<Order>> {
        Ok(self.orders.all()?)
    }

    /// All orders placed under `email`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn user_orders(&self, email: &Email) -> Result<Vec<Order>> {
        let mut orders = self.orders.all()?;
        orders.retain(|o| &o.email == email);
        Ok(orders)
    }

    /// Look up an order by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn get(&self, order_id: &OrderId) -> Result<Option<Order>> {
        Ok(self.orders.find(order_id)?)
    }

    /// Set an order's status. Returns the updated order, or `None` if
    /// no order has this id.
    ///
    /// Setting the same status again still advances `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if a read or write fails.
    pub fn update_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>> {
        let Some(updated) = self.orders.update_status(order_id, status, Utc::now())? else {
            return Ok(None);
        };
        self.events.emit(&StoreEvent::OrderUpdated {
            order_id: updated.order_id.clone(),
            status,
        });
        tracing::info!(order_id = %updated.order_id, %status, "order status changed");
        Ok(Some(updated))
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn sorted_by_date(&self) -> Result<Vec<Order>> {
        let mut orders = self.orders.all()?;
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    /// All orders currently in `status`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let mut orders = self.orders.all()?;
        orders.retain(|o| o.status == status);
        Ok(orders)
    }

    /// Orders placed between `start` and `end`, inclusive on both ends.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>> {
        let mut orders = self.orders.all()?;
        orders.retain(|o| o.order_date >= start && o.order_date <= end);
        Ok(orders)
    }

    /// Spending statistics for one customer.
    ///
    /// Every status appears in `status_counts`, zero or not, so
    /// consumers never have to special-case missing keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn user_statistics(&self, email: &Email) -> Result<OrderStatistics> {
        let orders = self.user_orders(email)?;

        let total_spent = round2(orders.iter().map(|o| o.totals.total).sum());
        let average_order_value = if orders.is_empty() {
            Decimal::ZERO
        } else {
            round2(total_spent / Decimal::from(orders.len()))
        };

        let mut status_counts: BTreeMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for order in &orders {
            if let Some(count) = status_counts.get_mut(&order.status) {
                *count += 1;
            }
        }

        Ok(OrderStatistics {
            total_orders: orders.len(),
            total_spent,
            average_order_value,
            status_counts,
        })
    }

    /// Remove an order. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if a read or write fails.
    pub fn delete_order(&self, order_id: &OrderId) -> Result<bool> {
        Ok(self.orders.delete(order_id)?)
    }

    /// Wipe the whole ledger.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the write fails.
    pub fn clear_all(&self) -> Result<()> {
        Ok(self.orders.clear()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use merchstand_core::ProductId;
    use rust_decimal::dec;

    use super::*;
    use crate::storage::MemoryStore;

    fn item(price: Decimal, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: ProductId::new(1),
            name: "Anime T-Shirt".to_owned(),
            price,
            quantity,
            size: "M".to_owned(),
            color: None,
            image: String::new(),
        }
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            address: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            zip: "62701".to_owned(),
            country: "US".to_owned(),
            phone: None,
        }
    }

    fn new_order(email: &str, items: Vec<OrderItem>) -> NewOrder {
        NewOrder {
            email: Email::parse(email).unwrap(),
            full_name: "Test Shopper".to_owned(),
            shipping: shipping(),
            items,
        }
    }

    fn ledger<'a>(store: &'a MemoryStore, events: &'a EventBus) -> OrderLedger<'a> {
        OrderLedger::new(store, events, PricingConfig::default())
    }

    #[test]
    fn test_totals_contract() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let ledger = ledger(&store, &events);

        let totals = ledger.totals_for(&[item(dec!(29.99), 2)]);
        assert_eq!(totals.subtotal, dec!(59.98));
        assert_eq!(totals.shipping, dec!(5.00));
        assert_eq!(totals.tax, dec!(6.00));
        assert_eq!(totals.total, dec!(70.98));
        // The stored parts sum exactly because tax is rounded first.
        assert_eq!(
            totals.subtotal + totals.shipping + totals.tax,
            totals.total
        );
    }

    #[test]
    fn test_create_order_starts_pending() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let ledger = ledger(&store, &events);

        let order = ledger
            .create_order(new_order("a@b.com", vec![item(dec!(29.99), 2)]))
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.order_date, order.updated_at);
        assert!(ledger.get(&order.order_id).unwrap().is_some());
    }

    #[test]
    fn test_create_order_rejects_empty_items() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let ledger = ledger(&store, &events);
        assert!(matches!(
            ledger.create_order(new_order("a@b.com", vec![])),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_order_id_allocation_gives_up_when_suffixes_exhausted() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let ledger = ledger(&store, &events);

        let at = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        // Every 4-digit suffix for this second is already taken.
        let orders: Vec<Order> = (0..10_000u16)
            .map(|suffix| Order {
                order_id: OrderId::from_parts(at.naive_utc(), suffix),
                email: Email::parse("a@b.com").unwrap(),
                full_name: "Test Shopper".to_owned(),
                shipping: shipping(),
                items: vec![item(dec!(10.00), 1)],
                totals: ledger.totals_for(&[item(dec!(10.00), 1)]),
                status: OrderStatus::Pending,
                order_date: at,
                updated_at: at,
            })
            .collect();
        crate::storage::put_json(&store, crate::storage::keys::ORDERS, &orders).unwrap();

        assert!(matches!(
            ledger.generate_order_id(at),
            Err(AppError::OrderIdExhausted(_))
        ));

        // The next second has all suffixes free again.
        let later = at + chrono::Duration::seconds(1);
        assert!(ledger.generate_order_id(later).is_ok());
    }

    #[test]
    fn test_update_status_missing_order_is_none() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let ledger = ledger(&store, &events);
        let missing = OrderId::parse("ORD-20240301-120000-0001").unwrap();
        assert!(
            ledger
                .update_status(&missing, OrderStatus::Shipped)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_update_status_emits_event() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&seen);
        events.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        let ledger = ledger(&store, &events);
        let order = ledger
            .create_order(new_order("a@b.com", vec![item(dec!(10.00), 1)]))
            .unwrap();
        let updated = ledger
            .update_status(&order.order_id, OrderStatus::Shipped)
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert!(updated.updated_at >= order.updated_at);

        let seen = seen.lock().unwrap();
        assert!(matches!(seen[0], StoreEvent::OrderCreated { .. }));
        assert!(matches!(
            seen[1],
            StoreEvent::OrderUpdated {
                status: OrderStatus::Shipped,
                ..
            }
        ));
    }

    #[test]
    fn test_user_orders_and_statistics() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let ledger = ledger(&store, &events);

        ledger
            .create_order(new_order("a@b.com", vec![item(dec!(29.99), 2)]))
            .unwrap();
        let second = ledger
            .create_order(new_order("a@b.com", vec![item(dec!(10.00), 1)]))
            .unwrap();
        ledger
            .create_order(new_order("other@b.com", vec![item(dec!(10.00), 1)]))
            .unwrap();
        assert!(
            ledger
                .update_status(&second.order_id, OrderStatus::Delivered)
                .unwrap()
                .is_some()
        );

        let email = Email::parse("a@b.com").unwrap();
        assert_eq!(ledger.user_orders(&email).unwrap().len(), 2);

        let stats = ledger.user_statistics(&email).unwrap();
        assert_eq!(stats.total_orders, 2);
        // 70.98 + 16.00
        assert_eq!(stats.total_spent, dec!(86.98));
        assert_eq!(stats.average_order_value, dec!(43.49));
        assert_eq!(stats.status_counts[&OrderStatus::Pending], 1);
        assert_eq!(stats.status_counts[&OrderStatus::Delivered], 1);
        assert_eq!(stats.status_counts[&OrderStatus::Cancelled], 0);
        assert_eq!(stats.status_counts.len(), OrderStatus::ALL.len());
    }

    #[test]
    fn test_statistics_for_unknown_customer() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let ledger = ledger(&store, &events);

        let email = Email::parse("nobody@b.com").unwrap();
        let stats = ledger.user_statistics(&email).unwrap();
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_spent, Decimal::ZERO);
        assert_eq!(stats.average_order_value, Decimal::ZERO);
        assert_eq!(stats.status_counts.len(), OrderStatus::ALL.len());
    }

    #[test]
    fn test_filters_and_sorting() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let ledger = ledger(&store, &events);

        let first = ledger
            .create_order(new_order("a@b.com", vec![item(dec!(10.00), 1)]))
            .unwrap();
        let second = ledger
            .create_order(new_order("a@b.com", vec![item(dec!(20.00), 1)]))
            .unwrap();
        assert!(
            ledger
                .update_status(&second.order_id, OrderStatus::Shipped)
                .unwrap()
                .is_some()
        );

        let shipped = ledger.by_status(OrderStatus::Shipped).unwrap();
        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped[0].order_id, second.order_id);

        let newest_first = ledger.sorted_by_date().unwrap();
        assert!(newest_first[0].order_date >= newest_first[1].order_date);

        let range = ledger
            .by_date_range(first.order_date, second.order_date)
            .unwrap();
        assert_eq!(range.len(), 2);
    }

    #[test]
    fn test_delete_and_clear() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let ledger = ledger(&store, &events);

        let order = ledger
            .create_order(new_order("a@b.com", vec![item(dec!(10.00), 1)]))
            .unwrap();
        assert!(ledger.delete_order(&order.order_id).unwrap());
        assert!(!ledger.delete_order(&order.order_id).unwrap());

        ledger
            .create_order(new_order("a@b.com", vec![item(dec!(10.00), 1)]))
            .unwrap();
        ledger.clear_all().unwrap();
        assert!(ledger.all_orders().unwrap().is_empty());
    }
}
