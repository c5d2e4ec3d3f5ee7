//! Newtype ids for type-safe entity references.
//!
//! All ids in the persisted data model are strings. Use the
//! `define_string_id!` macro to create type-safe wrappers that prevent
//! accidentally mixing ids from different entity types.

use core::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Macro to define a type-safe string id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()` from any string, `generate()` producing `<prefix>-<uuid>`
/// - `as_str()`, `Display`, and `From<String>`/`From<&str>` conversions
///
/// # Example
///
/// ```rust
/// # use merchstand_core::define_string_id;
/// define_string_id!(TicketId, "ticket");
///
/// let id = TicketId::generate();
/// assert!(id.as_str().starts_with("ticket-"));
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from an existing string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random id.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, ::uuid::Uuid::new_v4()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

define_string_id!(UserId, "user");
define_string_id!(AddressId, "addr");
define_string_id!(CartItemId, "item");
define_string_id!(MessageId, "msg");

/// Numeric identifier of a catalog product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Create a product id from its numeric value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Error parsing an [`OrderId`] from a string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid order id: {value}")]
pub struct OrderIdError {
    /// The rejected input.
    pub value: String,
}

/// An order identifier in the format `ORD-YYYYMMDD-HHMMSS-XXXX`.
///
/// The date and time come from the wall clock at creation and the last
/// four digits are a zero-padded random suffix. The format is dense
/// enough for humans to read an order date straight out of the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Build an order id from a timestamp and a random suffix.
    ///
    /// The suffix is taken modulo 10000, matching the 4-digit field.
    #[must_use]
    pub fn from_parts(at: NaiveDateTime, suffix: u16) -> Self {
        Self(format!(
            "ORD-{}-{}-{:04}",
            at.format("%Y%m%d"),
            at.format("%H%M%S"),
            suffix % 10_000
        ))
    }

    /// Parse an order id, validating the `ORD-YYYYMMDD-HHMMSS-XXXX` shape.
    ///
    /// # Errors
    ///
    /// Returns [`OrderIdError`] if the input does not match the format.
    pub fn parse(s: &str) -> Result<Self, OrderIdError> {
        let err = || OrderIdError {
            value: s.to_owned(),
        };

        let rest = s.strip_prefix("ORD-").ok_or_else(err)?;
        let mut segments = rest.split('-');
        let date = segments.next().ok_or_else(err)?;
        let time = segments.next().ok_or_else(err)?;
        let suffix = segments.next().ok_or_else(err)?;

        let well_formed = segments.next().is_none()
            && date.len() == 8
            && time.len() == 6
            && suffix.len() == 4
            && [date, time, suffix]
                .iter()
                .all(|seg| seg.bytes().all(|b| b.is_ascii_digit()));

        if well_formed {
            Ok(Self(s.to_owned()))
        } else {
            Err(err())
        }
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = OrderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
