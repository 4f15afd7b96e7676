//! Entity builders: one pass over each table's rows into keyed records.
//!
//! Later rows with a duplicate key overwrite earlier ones.

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::models::{
    Address, Attachment, AttachmentRow, ChatRow, Claimed, HandleRow, Message, MessageRow, RowId,
    Thread,
};
use crate::timestamp;

/// Contact addresses keyed by handle id.
pub type AddressBook = HashMap<RowId, Address>;

/// Threads keyed by chat id, iterated in ascending key order.
pub type Threads = BTreeMap<RowId, Thread>;

/// Pool of records not yet linked into a parent.
///
/// Claiming moves a record out; a second claim for the same id gets the
/// placeholder.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet<T> {
    records: HashMap<RowId, T>,
}

impl<T> WorkingSet<T> {
    /// Empty pool
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Add or replace a record.
    pub fn insert(&mut self, id: RowId, record: T) {
        self.records.insert(id, record);
    }

    /// Remove and return the record, or the placeholder if absent.
    pub fn claim(&mut self, id: RowId) -> Claimed<T> {
        self.records.remove(&id).into()
    }

    /// Borrow an unclaimed record mutably.
    pub fn get_mut(&mut self, id: RowId) -> Option<&mut T> {
        self.records.get_mut(&id)
    }

    /// Number of unclaimed records
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.records.len()
    }

    /// True when everything has been claimed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> FromIterator<(RowId, T)> for WorkingSet<T> {
    fn from_iter<I: IntoIterator<Item = (RowId, T)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Build the address book from `handle` rows.
pub fn build_addresses(rows: Vec<HandleRow>) -> AddressBook {
    rows.into_iter()
        .map(|row| {
            (
                row.id,
                Address {
                    address: row.address,
                    country: row.country,
                    service: row.service,
                },
            )
        })
        .collect()
}

/// Build unclaimed messages, each with an empty attachment list.
pub fn build_messages(rows: Vec<MessageRow>) -> Result<WorkingSet<Message>> {
    rows.into_iter()
        .map(|row| {
            let message = Message {
                text: row.text,
                address_id: row.handle_id,
                subject: row.subject,
                country: row.country,
                service: row.service,
                date: timestamp::normalize(row.date)?,
                is_from_me: row.is_from_me,
                attachments: Vec::new(),
            };
            Ok((row.id, message))
        })
        .collect()
}

/// Build unclaimed attachments.
pub fn build_attachments(rows: Vec<AttachmentRow>) -> Result<WorkingSet<Attachment>> {
    rows.into_iter()
        .map(|row| {
            let attachment = Attachment {
                date: timestamp::normalize(row.created_date)?,
                filename: row.filename,
                mime_type: row.mime_type,
                is_outgoing: row.is_outgoing,
                transfer_name: row.transfer_name,
            };
            Ok((row.id, attachment))
        })
        .collect()
}

/// Build empty threads, one per chat.
pub fn build_threads(rows: &[ChatRow]) -> Threads {
    rows.iter().map(|row| (row.id, Thread::default())).collect()
}
