//! Persisted data models.
//!
//! Every model here serializes with camelCase field names; the JSON
//! documents in storage are the interchange format, so renames are
//! load-bearing.

pub mod cart;
pub mod message;
pub mod order;
pub mod user;

pub use cart::CartItem;
pub use message::Message;
pub use order::{Order, OrderItem, OrderStatistics, OrderTotals, ShippingDetails};
pub use user::{Address, Preferences, User};
