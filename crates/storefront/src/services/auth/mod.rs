//! Account registration, sign-in and password management.
//!
//! Passwords are hashed with Argon2; the stored documents never hold
//! plaintext. Session state lives in the `currentUser` snapshot plus
//! the `isLoggedIn` flag, both owned by the user repository.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use merchstand_core::{Email, UserId};

use crate::events::{EventBus, StoreEvent};
use crate::models::{Preferences, User};
use crate::repo::{RepositoryError, UserRepository};
use crate::storage::KeyValueStore;

/// Minimum password length accepted at registration and password change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum display name length, after trimming.
pub const MIN_NAME_LENGTH: usize = 2;

/// Service for account lifecycle and session state.
pub struct AccountService<'a> {
    users: UserRepository<'a>,
    events: &'a EventBus,
}

impl<'a> AccountService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore, events: &'a EventBus) -> Self {
        Self {
            users: UserRepository::new(store),
            events,
        }
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidName` if the trimmed name is shorter
    /// than [`MIN_NAME_LENGTH`], `AuthError::InvalidEmail` or
    /// `AuthError::WeakPassword` if those inputs fail validation, and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let name = name.trim();
        if name.chars().count() < MIN_NAME_LENGTH {
            return Err(AuthError::InvalidName(format!(
                "name must be at least {MIN_NAME_LENGTH} characters"
            )));
        }
        let email = Email::parse(email)?;
        validate_password(password)?;

        let user = User {
            id: UserId::generate(),
            name: name.to_owned(),
            email,
            password_hash: hash_password(password)?,
            registered_at: Utc::now(),
            shipping_addresses: vec![],
            default_address_id: None,
            preferences: Preferences::default(),
        };

        let user = self.users.insert(user).map_err(|err| match err {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        self.users.set_current(&user)?;
        self.events.emit(&StoreEvent::UserLogin {
            email: user.email.clone(),
        });
        tracing::info!(email = %user.email, "registered new account");
        Ok(user)
    }

    /// Sign in with an email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches
    /// the email or the password does not verify.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .users
            .get_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, &user.password_hash)?;

        self.users.set_current(&user)?;
        self.events.emit(&StoreEvent::UserLogin {
            email: user.email.clone(),
        });
        tracing::info!(email = %user.email, "user signed in");
        Ok(user)
    }

    /// Sign out the current user. Signing out while signed out is fine.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the session state cannot be
    /// written.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.users.clear_current()?;
        self.events.emit(&StoreEvent::UserLogout);
        Ok(())
    }

    /// The signed-in account, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the read fails.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.users.current()?)
    }

    /// Whether a user is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the read fails.
    pub fn is_logged_in(&self) -> Result<bool, AuthError> {
        Ok(self.users.is_logged_in()?)
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` without a session,
    /// `AuthError::InvalidCredentials` if `current` does not verify,
    /// `AuthError::WeakPassword` or `AuthError::SamePassword` if the
    /// replacement fails validation.
    pub fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        let snapshot = self.users.current()?.ok_or(AuthError::NotLoggedIn)?;
        // Re-read the authoritative record; the snapshot may be stale.
        let user = self
            .users
            .get_by_id(&snapshot.id)?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(current, &user.password_hash)?;
        validate_password(new)?;
        if verify_password(new, &user.password_hash).is_ok() {
            return Err(AuthError::SamePassword);
        }

        let mut updated = user;
        updated.password_hash = hash_password(new)?;
        self.users.save(&updated)?;
        tracing::info!(email = %updated.email, "password changed");
        Ok(())
    }
}

/// Validate password strength.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is shorter than
/// [`MIN_PASSWORD_LENGTH`].
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with Argon2 and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the hash is unparseable
/// or the password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
