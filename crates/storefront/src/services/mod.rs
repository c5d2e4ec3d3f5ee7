//! Storefront services.
//!
//! Services hold the business rules. Each one borrows the store and
//! (where it changes visible state) the event bus; the [`crate::shop::Shop`]
//! composition root constructs them on demand.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod inbox;
pub mod ledger;
pub mod profile;

pub use auth::AccountService;
pub use cart::CartService;
pub use checkout::{CheckoutForm, CheckoutPrefill, CheckoutService};
pub use inbox::InboxService;
pub use ledger::{NewOrder, OrderLedger};
pub use profile::{AddressInput, ProfileService};
