//! Authentication errors.

use thiserror::Error;

use merchstand_core::EmailError;

use crate::repo::RepositoryError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email address is malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The display name failed validation.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// The password failed validation.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The new password matches the current one.
    #[error("new password must differ from the current password")]
    SamePassword,

    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// The email or password is wrong. Deliberately does not say which.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The operation requires a signed-in user.
    #[error("not logged in")]
    NotLoggedIn,

    /// The signed-in account no longer exists in the users document.
    #[error("account not found")]
    UserNotFound,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// A repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
