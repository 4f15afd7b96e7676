//! Data models for the export pipeline
//!
//! Two layers live here: the typed rows decoded from the store, and the
//! linked records that end up in the thread documents.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Primary key of any source row.
pub type RowId = i64;

/// A `handle` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleRow {
    /// Row key
    pub id: RowId,
    /// Phone number or email address
    pub address: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Service name (iMessage, SMS, ...)
    pub service: Option<String>,
}

/// A `message` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    /// Row key
    pub id: RowId,
    /// Body text
    pub text: Option<String>,
    /// Key of the sending/receiving handle
    pub handle_id: Option<RowId>,
    /// Subject line
    pub subject: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Service name
    pub service: Option<String>,
    /// Seconds since the reference epoch
    pub date: i64,
    /// Sent by the device owner
    pub is_from_me: bool,
}

/// An `attachment` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRow {
    /// Row key
    pub id: RowId,
    /// Seconds since the reference epoch
    pub created_date: i64,
    /// On-disk path
    pub filename: Option<String>,
    /// MIME type
    pub mime_type: Option<String>,
    /// Sent by the device owner
    pub is_outgoing: bool,
    /// Original file name
    pub transfer_name: Option<String>,
}

/// A `chat` row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatRow {
    /// Row key
    pub id: RowId,
}

/// A row of any two-column join table, `(owner, member)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinRow {
    /// Key of the owning record (message or chat)
    pub owner_id: RowId,
    /// Key of the linked record
    pub member_id: RowId,
}

/// A contact address. Referenced by key from messages and threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Phone number or email address
    pub address: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Service name
    pub service: Option<String>,
}

/// A message with its attachments resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Body text
    pub text: Option<String>,
    /// Key of the sending/receiving address
    pub address_id: Option<RowId>,
    /// Subject line
    pub subject: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Service name
    pub service: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub date: String,
    /// Sent by the device owner
    pub is_from_me: bool,
    /// Attachments in join-table order
    pub attachments: Vec<Claimed<Attachment>>,
}

/// An attachment as it appears inside a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// `YYYY-MM-DD HH:MM:SS`
    pub date: String,
    /// On-disk path
    pub filename: Option<String>,
    /// MIME type
    pub mime_type: Option<String>,
    /// Sent by the device owner
    pub is_outgoing: bool,
    /// Original file name
    pub transfer_name: Option<String>,
}

/// Result of claiming a record out of a working set.
///
/// `Missing` stands in for an id that was never present or was already
/// claimed by an earlier join row. It serializes as an empty object `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Claimed<T> {
    /// The record was still unclaimed
    Found(T),
    /// Placeholder for an unresolved reference
    Missing {},
}

impl<T> Claimed<T> {
    /// True for the placeholder
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing {})
    }

    /// The claimed record, if any
    #[must_use]
    pub const fn as_found(&self) -> Option<&T> {
        match self {
            Self::Found(record) => Some(record),
            Self::Missing {} => None,
        }
    }
}

impl<T> From<Option<T>> for Claimed<T> {
    fn from(record: Option<T>) -> Self {
        record.map_or(Self::Missing {}, Self::Found)
    }
}

/// A conversation being assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thread {
    /// Participant address keys
    pub address_ids: BTreeSet<RowId>,
    /// Messages in join-table order
    pub messages: Vec<Claimed<Message>>,
}

/// On-disk shape of a thread.
///
/// The participant set is flattened to an ascending list since JSON has no
/// set type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDocument {
    /// Participant address keys, ascending
    pub address_ids: Vec<RowId>,
    /// Messages in join-table order
    pub messages: Vec<Claimed<Message>>,
}

impl From<Thread> for ThreadDocument {
    fn from(thread: Thread) -> Self {
        Self {
            address_ids: thread.address_ids.into_iter().collect(),
            messages: thread.messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_attachment() -> Attachment {
        Attachment {
            date: "2001-01-01 00:00:00".to_string(),
            filename: Some("a.png".to_string()),
            mime_type: Some("image/png".to_string()),
            is_outgoing: false,
            transfer_name: Some("a.png".to_string()),
        }
    }

    #[test]
    fn test_missing_serializes_as_empty_object() {
        let slot: Claimed<Attachment> = Claimed::Missing {};
        assert_eq!(serde_json::to_string(&slot).unwrap(), "{}");
    }

    #[test]
    fn test_found_serializes_transparently() {
        let slot = Claimed::Found(sample_attachment());
        let value = serde_json::to_value(&slot).unwrap();
        assert_eq!(value["filename"], "a.png");
        assert_eq!(value["is_outgoing"], false);
    }

    #[test]
    fn test_empty_object_parses_as_missing() {
        let slot: Claimed<Message> = serde_json::from_str("{}").unwrap();
        assert!(slot.is_missing());
    }

    #[test]
    fn test_thread_document_sorts_participants() {
        let mut thread = Thread::default();
        thread.address_ids.extend([20, 10, 20]);
        let doc = ThreadDocument::from(thread);
        assert_eq!(doc.address_ids, vec![10, 20]);
    }

    #[test]
    fn test_claimed_from_option() {
        assert!(Claimed::<i64>::from(None).is_missing());
        assert_eq!(Claimed::from(Some(3)).as_found(), Some(&3));
    }
}
