//! Shared value types.

pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{AddressId, CartItemId, MessageId, OrderId, OrderIdError, ProductId, UserId};
pub use money::{line_total, round2};
pub use status::{InvalidStatusError, OrderStatus};
