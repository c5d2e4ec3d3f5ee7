//! User repository.
//!
//! Owns the `users` document (all accounts) plus the `currentUser`
//! snapshot and `isLoggedIn` flag that together form the session state.

use merchstand_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;
use crate::storage::{KeyValueStore, get_json, keys, put_json};

/// Repository for accounts and session state.
pub struct UserRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All registered accounts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub fn all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(get_json(self.store, keys::USERS)?)
    }

    /// Find an account by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.all()?.into_iter().find(|u| &u.email == email))
    }

    /// Append a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered, or `RepositoryError::Storage` if the write fails.
    pub fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.all()?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        users.push(user.clone());
        put_json(self.store, keys::USERS, &users)?;
        Ok(user)
    }

    /// Replace the stored account with the same id.
    ///
    /// If the updated account is the signed-in one, the `currentUser`
    /// snapshot is refreshed as well.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no account has this id,
    /// or `RepositoryError::Storage` if a write fails.
    pub fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.all()?;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = user.clone();
        put_json(self.store, keys::USERS, &users)?;

        if let Some(current) = self.current()?
            && current.id == user.id
        {
            put_json(self.store, keys::CURRENT_USER, user)?;
        }
        Ok(())
    }

    /// The signed-in account snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub fn current(&self) -> Result<Option<User>, RepositoryError> {
        Ok(get_json(self.store, keys::CURRENT_USER)?)
    }

    /// Record `user` as signed in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a write fails.
    pub fn set_current(&self, user: &User) -> Result<(), RepositoryError> {
        put_json(self.store, keys::CURRENT_USER, user)?;
        self.store.put(keys::IS_LOGGED_IN, "true")?;
        Ok(())
    }

    /// Clear the session state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a write fails.
    pub fn clear_current(&self) -> Result<(), RepositoryError> {
        self.store.remove(keys::CURRENT_USER)?;
        self.store.put(keys::IS_LOGGED_IN, "false")?;
        Ok(())
    }

    /// Whether both halves of the session state agree someone is
    /// signed in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub fn is_logged_in(&self) -> Result<bool, RepositoryError> {
        let flag = self.store.get(keys::IS_LOGGED_IN)?;
        Ok(flag.as_deref() == Some("true") && self.current()?.is_some())
    }

    /// Find an account by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.all()?.into_iter().find(|u| &u.id == id))
    }
}
