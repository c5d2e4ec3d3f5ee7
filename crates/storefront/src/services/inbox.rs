//! The customer inbox.
//!
//! A stand-in for transactional email: messages are stored per
//! customer, newest first, and read back by the account pages.

use chrono::Utc;

use merchstand_core::{Email, MessageId};

use crate::error::Result;
use crate::models::Message;
use crate::repo::InboxRepository;
use crate::storage::KeyValueStore;

/// Service for per-customer inboxes.
pub struct InboxService<'a> {
    inbox: InboxRepository<'a>,
}

impl<'a> InboxService<'a> {
    /// Create a new inbox service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self {
            inbox: InboxRepository::new(store),
        }
    }

    /// Messages for `email`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the read fails.
    pub fn messages(&self, email: &Email) -> Result<Vec<Message>> {
        Ok(self.inbox.messages(email)?)
    }

    /// Deliver a message to a customer's inbox.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if a read or write fails.
    pub fn send(
        &self,
        email: &Email,
        subject: &str,
        preview: &str,
        content: &str,
    ) -> Result<Message> {
        let message = Message {
            id: MessageId::generate(),
            date: Utc::now(),
            subject: subject.to_owned(),
            preview: preview.to_owned(),
            content: content.to_owned(),
        };
        self.inbox.push_front(email, message.clone())?;
        tracing::debug!(to = %email, subject, "message delivered");
        Ok(message)
    }
}
