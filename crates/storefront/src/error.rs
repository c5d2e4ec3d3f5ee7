//! Unified error handling.
//!
//! Provides a unified `AppError` type that callers above the service
//! layer (the CLI, tests) can match on. Services that have a richer
//! error vocabulary of their own convert into it via `#[from]`.

use thiserror::Error;

use merchstand_core::{EmailError, InvalidStatusError};

use crate::repo::RepositoryError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid email address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Unrecognized order status.
    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatusError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Order id allocation ran out of retry attempts.
    #[error("could not allocate a unique order id after {0} attempts")]
    OrderIdExhausted(usize),

    /// Operation requires a signed-in user.
    #[error("not logged in")]
    NotLoggedIn,
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
