//! Inbox repository.
//!
//! The `userEmails` document maps a normalized email address to that
//! customer's messages, newest first.

use std::collections::BTreeMap;

use merchstand_core::Email;

use super::RepositoryError;
use crate::models::Message;
use crate::storage::{KeyValueStore, get_json, keys, put_json};

type InboxMap = BTreeMap<String, Vec<Message>>;

/// Repository for per-customer inboxes.
pub struct InboxRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> InboxRepository<'a> {
    /// Create a new inbox repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Messages for `email`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the read fails.
    pub fn messages(&self, email: &Email) -> Result<Vec<Message>, RepositoryError> {
        let map: InboxMap = get_json(self.store, keys::USER_EMAILS)?;
        Ok(map.get(email.as_str()).cloned().unwrap_or_default())
    }

    /// Prepend a message to the inbox for `email`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a read or write fails.
    pub fn push_front(&self, email: &Email, message: Message) -> Result<(), RepositoryError> {
        let mut map: InboxMap = get_json(self.store, keys::USER_EMAILS)?;
        map.entry(email.as_str().to_owned())
            .or_default()
            .insert(0, message);
        put_json(self.store, keys::USER_EMAILS, &map).map_err(RepositoryError::from)
    }

    /// Move an inbox from `old` to `new`. Returns whether an inbox
    /// existed under `old`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a read or write fails.
    pub fn reassign_email(&self, old: &Email, new: &Email) -> Result<bool, RepositoryError> {
        let mut map: InboxMap = get_json(self.store, keys::USER_EMAILS)?;
        let Some(messages) = map.remove(old.as_str()) else {
            return Ok(false);
        };
        map.insert(new.as_str().to_owned(), messages);
        put_json(self.store, keys::USER_EMAILS, &map)?;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use merchstand_core::MessageId;

    use super::*;
    use crate::storage::MemoryStore;

    fn message(subject: &str) -> Message {
        Message {
            id: MessageId::generate(),
            date: Utc::now(),
            subject: subject.to_owned(),
            preview: String::new(),
            content: String::new(),
        }
    }

    #[test]
    fn test_push_front_keeps_newest_first() {
        let store = MemoryStore::new();
        let repo = InboxRepository::new(&store);
        let email = Email::parse("a@b.com").unwrap();

        repo.push_front(&email, message("first")).unwrap();
        repo.push_front(&email, message("second")).unwrap();

        let subjects: Vec<String> = repo
            .messages(&email)
            .unwrap()
            .into_iter()
            .map(|m| m.subject)
            .collect();
        assert_eq!(subjects, vec!["second", "first"]);
    }

    #[test]
    fn test_unknown_inbox_is_empty() {
        let store = MemoryStore::new();
        let repo = InboxRepository::new(&store);
        let email = Email::parse("nobody@b.com").unwrap();
        assert!(repo.messages(&email).unwrap().is_empty());
    }

    #[test]
    fn test_reassign_moves_whole_inbox() {
        let store = MemoryStore::new();
        let repo = InboxRepository::new(&store);
        let old = Email::parse("old@b.com").unwrap();
        let new = Email::parse("new@b.com").unwrap();

        repo.push_front(&old, message("hello")).unwrap();
        assert!(repo.reassign_email(&old, &new).unwrap());

        assert!(repo.messages(&old).unwrap().is_empty());
        assert_eq!(repo.messages(&new).unwrap().len(), 1);

        // Nothing left under the old address to move again.
        assert!(!repo.reassign_email(&old, &new).unwrap());
    }
}
