//! Account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merchstand_core::{AddressId, Email, UserId};

/// A registered account.
///
/// Stored in the `users` document; a snapshot of the signed-in user is
/// also kept under `currentUser`. The password is stored only as an
/// Argon2 hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    #[serde(rename = "registeredDate")]
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    pub shipping_addresses: Vec<Address>,
    #[serde(default)]
    pub default_address_id: Option<AddressId>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl User {
    /// Look up one of the user's saved addresses.
    #[must_use]
    pub fn address(&self, id: &AddressId) -> Option<&Address> {
        self.shipping_addresses.iter().find(|a| &a.id == id)
    }

    /// The user's default shipping address, if one is set and still
    /// exists.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.default_address_id
            .as_ref()
            .and_then(|id| self.address(id))
    }
}

/// A saved shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    /// Recipient name.
    pub name: String,
    /// Street address.
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    /// Optional contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Communication preferences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub newsletter: bool,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

const fn default_notifications() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            newsletter: false,
            notifications: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new("user-1"),
            name: "Ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            password_hash: "$argon2id$stub".to_owned(),
            registered_at: Utc::now(),
            shipping_addresses: vec![Address {
                id: AddressId::new("addr-1"),
                name: "Ada".to_owned(),
                address: "1 Infinite Loop".to_owned(),
                city: "Cupertino".to_owned(),
                state: "CA".to_owned(),
                zip: "95014".to_owned(),
                country: "US".to_owned(),
                phone: Some("555-0100".to_owned()),
            }],
            default_address_id: Some(AddressId::new("addr-1")),
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert!(!prefs.newsletter);
        assert!(prefs.notifications);
    }

    #[test]
    fn test_default_address_lookup() {
        let mut user = sample_user();
        assert_eq!(user.default_address().unwrap().city, "Cupertino");

        // Pointer to a deleted address resolves to nothing.
        user.shipping_addresses.clear();
        assert!(user.default_address().is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("passwordHash").is_some());
        assert!(json.get("registeredDate").is_some());
        assert!(json.get("shippingAddresses").is_some());
        assert!(json.get("defaultAddressId").is_some());
    }

    #[test]
    fn test_deserializes_sparse_document() {
        // Older documents may lack addresses and preferences entirely.
        let json = r#"{
            "id": "user-7",
            "name": "Sam",
            "email": "sam@example.com",
            "passwordHash": "h",
            "registeredDate": "2024-01-15T10:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.shipping_addresses.is_empty());
        assert!(user.default_address_id.is_none());
        assert!(user.preferences.notifications);
    }
}
