//! Store events.
//!
//! Services emit events when visible state changes, so that decoupled
//! listeners (UI layers, loggers) can react without the services
//! knowing about them.

use std::sync::{Arc, Mutex};

use merchstand_core::{Email, OrderId, OrderStatus};

/// An event emitted by a storefront service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A user signed in (registration auto-signs-in too).
    UserLogin { email: Email },
    /// The current user signed out.
    UserLogout,
    /// The cart contents changed.
    CartUpdated,
    /// A new order was appended to the ledger.
    OrderCreated { order_id: OrderId },
    /// An order's status changed.
    OrderUpdated {
        order_id: OrderId,
        status: OrderStatus,
    },
}

type Subscriber = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// A synchronous fan-out bus for [`StoreEvent`]s.
///
/// Cheaply cloneable; clones share the subscriber list. Subscribers are
/// invoked in registration order on the emitting thread.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for all future events.
    pub fn subscribe(&self, listener: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.lock().push(Box::new(listener));
    }

    /// Deliver `event` to every subscriber.
    pub fn emit(&self, event: &StoreEvent) {
        tracing::debug!(?event, "store event");
        for listener in self.lock().iter() {
            listener(event);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Subscriber>> {
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.lock().len())
            .finish()
    }
}
