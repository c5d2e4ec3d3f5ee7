//! Profile management for the signed-in user.
//!
//! Covers personal info (name, email) and the saved address book.
//! Changing the account email relinks the order ledger and the inbox so
//! the customer's history follows them to the new address.

use merchstand_core::AddressId;

use crate::error::{AppError, Result};
use crate::models::{Address, User};
use crate::repo::{InboxRepository, OrderRepository, UserRepository};
use crate::services::auth::MIN_NAME_LENGTH;
use crate::storage::KeyValueStore;

/// Minimum street address length, after trimming.
const MIN_STREET_LENGTH: usize = 5;

/// Accepted postal code lengths.
const ZIP_LENGTH: std::ops::RangeInclusive<usize> = 3..=10;

/// Address fields as entered in a form, before validation.
#[derive(Debug, Clone, Default)]
pub struct AddressInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: Option<String>,
    /// Make this address the default after saving.
    pub make_default: bool,
}

/// Service for the signed-in user's profile.
pub struct ProfileService<'a> {
    users: UserRepository<'a>,
    orders: OrderRepository<'a>,
    inbox: InboxRepository<'a>,
}

impl<'a> ProfileService<'a> {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            users: UserRepository::new(store),
            orders: OrderRepository::new(store),
            inbox: InboxRepository::new(store),
        }
    }

    /// Update the signed-in user's name and email.
    ///
    /// When the email changes, orders and inbox messages recorded under
    /// the old address are moved to the new one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotLoggedIn` without a session,
    /// `AppError::Validation` for a short name, `AppError::InvalidEmail`
    /// for a malformed email, and `AppError::Auth` if the new email
    /// belongs to another account.
    pub fn update_personal_info(&self, name: &str, email: &str) -> Result<User> {
        let name = name.trim();
        if name.chars().count() < MIN_NAME_LENGTH {
            return Err(AppError::Validation(format!(
                "name must be at least {MIN_NAME_LENGTH} characters"
            )));
        }
        let new_email = merchstand_core::Email::parse(email)?;

        let mut user = self.current_full()?;
        let old_email = user.email.clone();

        if new_email != old_email
            && self.users.get_by_email(&new_email)?.is_some()
        {
            return Err(AppError::Auth(
                crate::services::auth::AuthError::UserAlreadyExists,
            ));
        }

        user.name = name.to_owned();
        user.email = new_email.clone();
        self.users.save(&user)?;

        if new_email != old_email {
            let moved = self.orders.reassign_email(&old_email, &new_email)?;
            self.inbox.reassign_email(&old_email, &new_email)?;
            tracing::info!(
                old = %old_email,
                new = %new_email,
                orders_moved = moved,
                "account email changed"
            );
        }
        Ok(user)
    }

    /// Toggle the newsletter and notification preferences.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotLoggedIn` without a session.
    pub fn update_preferences(&self, newsletter: bool, notifications: bool) -> Result<User> {
        let mut user = self.current_full()?;
        user.preferences.newsletter = newsletter;
        user.preferences.notifications = notifications;
        self.users.save(&user)?;
        Ok(user)
    }

    /// The signed-in user's saved addresses.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotLoggedIn` without a session.
    pub fn addresses(&self) -> Result<Vec<Address>> {
        Ok(self.current_full()?.shipping_addresses)
    }

    /// Save a new address to the signed-in user's address book.
    ///
    /// A first address does not become the default automatically; the
    /// caller opts in with [`AddressInput::make_default`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotLoggedIn` without a session, or
    /// `AppError::Validation` if a field fails validation.
    pub fn add_address(&self, input: AddressInput) -> Result<Address> {
        let make_default = input.make_default;
        let address = validated_address(AddressId::generate(), input)?;

        let mut user = self.current_full()?;
        user.shipping_addresses.push(address.clone());
        if make_default {
            user.default_address_id = Some(address.id.clone());
        }
        self.users.save(&user)?;
        Ok(address)
    }

    /// Replace a saved address, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the signed-in user has no
    /// address with this id, or `AppError::Validation` if a field fails
    /// validation.
    pub fn update_address(&self, id: &AddressId, input: AddressInput) -> Result<Address> {
        let make_default = input.make_default;
        let address = validated_address(id.clone(), input)?;

        let mut user = self.current_full()?;
        let slot = user
            .shipping_addresses
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("address {id}")))?;
        *slot = address.clone();
        if make_default {
            user.default_address_id = Some(id.clone());
        }
        self.users.save(&user)?;
        Ok(address)
    }

    /// Delete a saved address.
    ///
    /// Deleting the default address clears the default pointer; no
    /// other address is promoted.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the signed-in user has no
    /// address with this id.
    pub fn delete_address(&self, id: &AddressId) -> Result<()> {
        let mut user = self.current_full()?;
        let before = user.shipping_addresses.len();
        user.shipping_addresses.retain(|a| &a.id != id);
        if user.shipping_addresses.len() == before {
            return Err(AppError::NotFound(format!("address {id}")));
        }
        if user.default_address_id.as_ref() == Some(id) {
            user.default_address_id = None;
        }
        self.users.save(&user)?;
        Ok(())
    }

    /// Mark a saved address as the default.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the signed-in user has no
    /// address with this id.
    pub fn set_default_address(&self, id: &AddressId) -> Result<()> {
        let mut user = self.current_full()?;
        if user.address(id).is_none() {
            return Err(AppError::NotFound(format!("address {id}")));
        }
        user.default_address_id = Some(id.clone());
        self.users.save(&user)?;
        Ok(())
    }

    /// The authoritative record for the signed-in user.
    fn current_full(&self) -> Result<User> {
        let snapshot = self.users.current()?.ok_or(AppError::NotLoggedIn)?;
        self.users
            .get_by_id(&snapshot.id)?
            .ok_or_else(|| AppError::NotFound(format!("user {}", snapshot.id)))
    }
}

/// Validate address fields and assemble an [`Address`].
fn validated_address(id: AddressId, input: AddressInput) -> Result<Address> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("recipient name is required".to_owned()));
    }
    let street = input.address.trim();
    if street.chars().count() < MIN_STREET_LENGTH {
        return Err(AppError::Validation(format!(
            "street address must be at least {MIN_STREET_LENGTH} characters"
        )));
    }
    let city = input.city.trim();
    if city.chars().count() < 2 {
        return Err(AppError::Validation(
            "city must be at least 2 characters".to_owned(),
        ));
    }
    let state = input.state.trim();
    if state.chars().count() < 2 {
        return Err(AppError::Validation(
            "state must be at least 2 characters".to_owned(),
        ));
    }
    let zip = input.zip.trim();
    let zip_ok = ZIP_LENGTH.contains(&zip.chars().count())
        && zip
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-');
    if !zip_ok {
        return Err(AppError::Validation(
            "postal code must be 3 to 10 letters, digits, spaces or hyphens".to_owned(),
        ));
    }
    let country = input.country.trim();
    if country.is_empty() {
        return Err(AppError::Validation("country is required".to_owned()));
    }

    Ok(Address {
        id,
        name: name.to_owned(),
        address: street.to_owned(),
        city: city.to_owned(),
        state: state.to_owned(),
        zip: zip.to_owned(),
        country: country.to_owned(),
        phone: input
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned),
    })
}
