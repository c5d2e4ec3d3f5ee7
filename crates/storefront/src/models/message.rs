//! Inbox models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merchstand_core::MessageId;

/// A message in a customer's inbox.
///
/// The store writes these itself (order confirmations and the like);
/// nothing is ever sent over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub date: DateTime<Utc>,
    pub subject: String,
    /// Short one-line summary shown in list views.
    pub preview: String,
    pub content: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_message_roundtrip() {
        let message = Message {
            id: MessageId::generate(),
            date: Utc::now(),
            subject: "Order Confirmation - ORD-20240307-090542-0007".to_owned(),
            preview: "Thank you for your order! Total: $70.98".to_owned(),
            content: "<h2>Order Confirmation</h2>".to_owned(),
        };

        let json = serde_json::to_string(&message).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, message);
    }
}
