//! Key-value persistence for storefront state.
//!
//! The storefront keeps all of its state in a handful of JSON documents
//! under well-known keys (see [`keys`]). The [`KeyValueStore`] trait
//! abstracts the backend: [`MemoryStore`] for tests and ephemeral use,
//! [`FileStore`] for one-file-per-key persistence on disk.
//!
//! Reads are lenient: a document that no longer parses is discarded and
//! replaced by the type's default, so a single corrupt record cannot
//! take the whole store down with it.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// All registered accounts.
    pub const USERS: &str = "users";
    /// Snapshot of the signed-in account.
    pub const CURRENT_USER: &str = "currentUser";
    /// Login flag, `"true"` or `"false"`.
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    /// Cart lines.
    pub const CART: &str = "cart";
    /// The order ledger.
    pub const ORDERS: &str = "orders";
    /// Per-address inbox of store messages.
    pub const USER_EMAILS: &str = "userEmails";
}

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("failed to encode value for key `{key}`: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },

    /// The key contains characters the backend cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A flat string-to-string store.
///
/// Implementations must treat `put` as a full replacement of the value
/// under `key` and `get` of an absent key as `None`, not an error.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails; an absent key is
    /// `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Deleting an absent key is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode the JSON document at `key`.
///
/// A missing key or a document that fails to parse yields
/// `T::default()`; corruption is logged and the bad document is left in
/// place until the next write replaces it.
///
/// # Errors
///
/// Returns [`StorageError`] only if the backend read itself fails.
pub fn get_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding corrupt document");
            Ok(T::default())
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] if serialization fails, or the
/// backend's error if the write fails.
pub fn put_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.put(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_json_missing_key_yields_default() {
        let store = MemoryStore::new();
        let value: Vec<String> = get_json(&store, "nothing-here").unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_get_json_roundtrip() {
        let store = MemoryStore::new();
        put_json(&store, "list", &vec!["a".to_owned(), "b".to_owned()]).unwrap();

        let value: Vec<String> = get_json(&store, "list").unwrap();
        assert_eq!(value, vec!["a", "b"]);
    }

    #[test]
    fn test_get_json_corrupt_document_yields_default() {
        let store = MemoryStore::new();
        store.put("list", "{not json").unwrap();

        let value: Vec<String> = get_json(&store, "list").unwrap();
        assert!(value.is_empty());
    }
}
