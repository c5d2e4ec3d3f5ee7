//! Typed repositories over the key-value store.
//!
//! Each repository owns one storage key and knows how to load, mutate,
//! and rewrite the JSON document under it. Services compose
//! repositories; nothing above this layer touches raw keys.

pub mod cart;
pub mod inbox;
pub mod orders;
pub mod users;

pub use cart::CartRepository;
pub use inbox::InboxRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A uniqueness rule was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced record does not exist.
    #[error("not found")]
    NotFound,
}
