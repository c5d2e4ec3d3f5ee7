//! Checkout.
//!
//! Turns the current cart into an order: validates the shipping form,
//! resolves which email the order belongs to, writes the order through
//! the ledger, empties the cart and drops a confirmation message into
//! the customer's inbox.

use merchstand_core::Email;

use crate::config::PricingConfig;
use crate::error::{AppError, Result};
use crate::events::EventBus;
use crate::models::{Address, Order, OrderItem, ShippingDetails};
use crate::repo::UserRepository;
use crate::services::cart::CartService;
use crate::services::inbox::InboxService;
use crate::services::ledger::{NewOrder, OrderLedger};
use crate::storage::KeyValueStore;

/// The checkout form as submitted.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: Option<String>,
}

/// Values to prefill the checkout form with for a signed-in user.
#[derive(Debug, Clone, Default)]
pub struct CheckoutPrefill {
    pub full_name: Option<String>,
    pub email: Option<Email>,
    pub address: Option<Address>,
}

/// Service for placing orders from the cart.
pub struct CheckoutService<'a> {
    store: &'a dyn KeyValueStore,
    events: &'a EventBus,
    pricing: PricingConfig,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(
        store: &'a dyn KeyValueStore,
        events: &'a EventBus,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            store,
            events,
            pricing,
        }
    }

    /// Prefill values from the signed-in user, if any.
    ///
    /// The address comes from the user's default address; without a
    /// default nothing is prefilled even if addresses are saved.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn prefill(&self) -> Result<CheckoutPrefill> {
        let Some(user) = UserRepository::new(self.store).current()? else {
            return Ok(CheckoutPrefill::default());
        };
        Ok(CheckoutPrefill {
            full_name: Some(user.name.clone()),
            email: Some(user.email.clone()),
            address: user.default_address().cloned(),
        })
    }

    /// Place an order for the current cart contents.
    ///
    /// For a signed-in user the order is recorded under the account
    /// email regardless of what the form says; guests use the form
    /// email. On success the cart is emptied and a confirmation message
    /// lands in the inbox of whichever email the order went to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if a form field is invalid or the
    /// cart is empty.
    pub fn place_order(&self, form: &CheckoutForm) -> Result<Order> {
        let full_name = require(&form.full_name, "full name")?;
        let form_email = Email::parse(&form.email)?;
        let shipping = ShippingDetails {
            address: require(&form.address, "address")?,
            city: require(&form.city, "city")?,
            state: require(&form.state, "state")?,
            zip: require(&form.zip, "postal code")?,
            country: require(&form.country, "country")?,
            phone: form
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_owned),
        };

        let cart = CartService::new(self.store, self.events);
        let items: Vec<OrderItem> = cart
            .items()?
            .into_iter()
            .map(OrderItem::from)
            .collect();
        if items.is_empty() {
            return Err(AppError::Validation("cart is empty".to_owned()));
        }

        let email = UserRepository::new(self.store)
            .current()?
            .map_or(form_email, |user| user.email);

        let ledger = OrderLedger::new(self.store, self.events, self.pricing);
        let order = ledger.create_order(NewOrder {
            email: email.clone(),
            full_name,
            shipping,
            items,
        })?;

        cart.clear()?;

        let inbox = InboxService::new(self.store);
        inbox.send(
            &email,
            &format!("Order Confirmation - {}", order.order_id),
            &format!("Thank you for your order! Total: ${}", order.totals.total),
            &render_confirmation(&order),
        )?;

        Ok(order)
    }
}

fn require(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(value.to_owned())
}

/// The plain-text body of the order confirmation message.
fn render_confirmation(order: &Order) -> String {
    use std::fmt::Write;

    let mut body = String::new();
    let _ = writeln!(body, "Hi {},", order.full_name);
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Thank you for your order! Your order {} has been received.",
        order.order_id
    );
    let _ = writeln!(body);
    for item in &order.items {
        let _ = writeln!(
            body,
            "  {} x{} (size {}) - ${}",
            item.name,
            item.quantity,
            item.size,
            merchstand_core::line_total(item.price, item.quantity)
        );
    }
    let _ = writeln!(body);
    let _ = writeln!(body, "Subtotal: ${}", order.totals.subtotal);
    let _ = writeln!(body, "Shipping: ${}", order.totals.shipping);
    let _ = writeln!(body, "Tax: ${}", order.totals.tax);
    let _ = writeln!(body, "Total: ${}", order.totals.total);
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Shipping to: {}, {}, {} {}, {}",
        order.shipping.address,
        order.shipping.city,
        order.shipping.state,
        order.shipping.zip,
        order.shipping.country
    );
    body
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::catalog::Catalog;
    use crate::services::AccountService;
    use crate::storage::MemoryStore;

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Ada Lovelace".to_owned(),
            email: "guest@example.com".to_owned(),
            address: "1 Analytical Way".to_owned(),
            city: "London".to_owned(),
            state: "LN".to_owned(),
            zip: "SW1A 1AA".to_owned(),
            country: "UK".to_owned(),
            phone: None,
        }
    }

    fn add_shirt(store: &MemoryStore, events: &EventBus, quantity: u32) {
        let catalog = Catalog::standard();
        let product = catalog.all().first().cloned().unwrap();
        CartService::new(store, events)
            .add(&product, Some("M"), quantity, None)
            .unwrap();
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let checkout = CheckoutService::new(&store, &events, PricingConfig::default());
        assert!(matches!(
            checkout.place_order(&form()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_guest_checkout_uses_form_email() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        add_shirt(&store, &events, 2);

        let checkout = CheckoutService::new(&store, &events, PricingConfig::default());
        let order = checkout.place_order(&form()).unwrap();

        assert_eq!(order.email.as_str(), "guest@example.com");
        assert_eq!(order.totals.subtotal, dec!(59.98));
        assert_eq!(order.totals.tax, dec!(6.00));
        assert_eq!(order.totals.total, dec!(70.98));

        // Cart is emptied on success.
        assert!(
            CartService::new(&store, &events)
                .items()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_signed_in_email_overrides_form_email() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        AccountService::new(&store, &events)
            .register("Ada", "ada@example.com", "secret1")
            .unwrap();
        add_shirt(&store, &events, 1);

        let checkout = CheckoutService::new(&store, &events, PricingConfig::default());
        let order = checkout.place_order(&form()).unwrap();
        assert_eq!(order.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_confirmation_message_lands_in_inbox() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        add_shirt(&store, &events, 2);

        let checkout = CheckoutService::new(&store, &events, PricingConfig::default());
        let order = checkout.place_order(&form()).unwrap();

        let email = Email::parse("guest@example.com").unwrap();
        let messages = InboxService::new(&store).messages(&email).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].subject,
            format!("Order Confirmation - {}", order.order_id)
        );
        assert_eq!(
            messages[0].preview,
            "Thank you for your order! Total: $70.98"
        );
        assert!(messages[0].content.contains("Subtotal: $59.98"));
    }

    #[test]
    fn test_form_validation() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        add_shirt(&store, &events, 1);
        let checkout = CheckoutService::new(&store, &events, PricingConfig::default());

        let mut missing_name = form();
        missing_name.full_name = "  ".to_owned();
        assert!(matches!(
            checkout.place_order(&missing_name),
            Err(AppError::Validation(_))
        ));

        let mut bad_email = form();
        bad_email.email = "nope".to_owned();
        assert!(matches!(
            checkout.place_order(&bad_email),
            Err(AppError::InvalidEmail(_))
        ));

        // Failed validation leaves the cart alone.
        assert_eq!(
            CartService::new(&store, &events).items().unwrap().len(),
            1
        );
    }

    #[test]
    fn test_prefill_uses_default_address_only() {
        let store = MemoryStore::new();
        let events = EventBus::new();
        let checkout = CheckoutService::new(&store, &events, PricingConfig::default());

        // Guest: nothing to prefill.
        let prefill = checkout.prefill().unwrap();
        assert!(prefill.email.is_none());

        AccountService::new(&store, &events)
            .register("Ada", "ada@example.com", "secret1")
            .unwrap();
        let profile = crate::services::ProfileService::new(&store);
        let saved = profile
            .add_address(crate::services::AddressInput {
                name: "Ada".to_owned(),
                address: "1 Analytical Way".to_owned(),
                city: "London".to_owned(),
                state: "LN".to_owned(),
                zip: "SW1A 1AA".to_owned(),
                country: "UK".to_owned(),
                phone: None,
                make_default: false,
            })
            .unwrap();

        // Saved but not default: no address prefill.
        let prefill = checkout.prefill().unwrap();
        assert_eq!(prefill.email.unwrap().as_str(), "ada@example.com");
        assert!(prefill.address.is_none());

        profile.set_default_address(&saved.id).unwrap();
        let prefill = checkout.prefill().unwrap();
        assert_eq!(prefill.address.unwrap().id, saved.id);
    }
}
