//! Read-only access to the source message store.
//!
//! Every scan is a full-table `SELECT` with no ordering, decoded into typed
//! rows here so nothing downstream touches column names or positions.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Row};
use tracing::{debug, info};

use crate::error::Result;
use crate::metrics;
use crate::models::{AttachmentRow, ChatRow, HandleRow, JoinRow, MessageRow};
use crate::schema::{
    attachment, chat, chat_handle_join, chat_message_join, handle, message, message_attachment_join,
};

/// Connection to a message store, opened once for the whole run.
pub struct SourceDatabase {
    conn: Connection,
    path: PathBuf,
}

impl SourceDatabase {
    /// Open the store read-only. A missing file is an error, never created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        info!("Opened message store at {}", path.display());
        Ok(Self { conn, path })
    }

    /// Location of the store on disk
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `SELECT <columns> FROM <table>` and decode every row.
    fn scan<T, F>(&self, table: &'static str, columns: &[&str], map_row: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = format!("SELECT {} FROM {}", columns.join(", "), table);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_row)?.collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(table, rows = rows.len(), "Scanned table");
        metrics::record_rows_read(table, rows.len());
        Ok(rows)
    }

    /// All contact addresses
    pub fn handles(&self) -> Result<Vec<HandleRow>> {
        self.scan(
            handle::TABLE,
            &[handle::ROWID, handle::ID, handle::COUNTRY, handle::SERVICE],
            |row| {
                Ok(HandleRow {
                    id: row.get(0)?,
                    address: row.get(1)?,
                    country: row.get(2)?,
                    service: row.get(3)?,
                })
            },
        )
    }

    /// All messages
    pub fn messages(&self) -> Result<Vec<MessageRow>> {
        self.scan(
            message::TABLE,
            &[
                message::ROWID,
                message::TEXT,
                message::HANDLE_ID,
                message::SUBJECT,
                message::COUNTRY,
                message::SERVICE,
                message::DATE,
                message::IS_FROM_ME,
            ],
            |row| {
                Ok(MessageRow {
                    id: row.get(0)?,
                    text: row.get(1)?,
                    handle_id: row.get(2)?,
                    subject: row.get(3)?,
                    country: row.get(4)?,
                    service: row.get(5)?,
                    date: row.get(6)?,
                    is_from_me: flag(row, 7)?,
                })
            },
        )
    }

    /// All attachments
    pub fn attachments(&self) -> Result<Vec<AttachmentRow>> {
        self.scan(
            attachment::TABLE,
            &[
                attachment::ROWID,
                attachment::CREATED_DATE,
                attachment::FILENAME,
                attachment::MIME_TYPE,
                attachment::IS_OUTGOING,
                attachment::TRANSFER_NAME,
            ],
            |row| {
                Ok(AttachmentRow {
                    id: row.get(0)?,
                    created_date: row.get(1)?,
                    filename: row.get(2)?,
                    mime_type: row.get(3)?,
                    is_outgoing: flag(row, 4)?,
                    transfer_name: row.get(5)?,
                })
            },
        )
    }

    /// All conversation threads
    pub fn chats(&self) -> Result<Vec<ChatRow>> {
        self.scan(chat::TABLE, &[chat::ROWID], |row| Ok(ChatRow { id: row.get(0)? }))
    }

    /// `(message_id, attachment_id)` pairs
    pub fn message_attachments(&self) -> Result<Vec<JoinRow>> {
        self.scan(
            message_attachment_join::TABLE,
            &[message_attachment_join::MESSAGE_ID, message_attachment_join::ATTACHMENT_ID],
            join_row,
        )
    }

    /// `(chat_id, handle_id)` pairs
    pub fn chat_handles(&self) -> Result<Vec<JoinRow>> {
        self.scan(
            chat_handle_join::TABLE,
            &[chat_handle_join::CHAT_ID, chat_handle_join::HANDLE_ID],
            join_row,
        )
    }

    /// `(chat_id, message_id)` pairs
    pub fn chat_messages(&self) -> Result<Vec<JoinRow>> {
        self.scan(
            chat_message_join::TABLE,
            &[chat_message_join::CHAT_ID, chat_message_join::MESSAGE_ID],
            join_row,
        )
    }
}

fn join_row(row: &Row<'_>) -> rusqlite::Result<JoinRow> {
    Ok(JoinRow {
        owner_id: row.get(0)?,
        member_id: row.get(1)?,
    })
}

// Integer flag column; NULL reads as false.
fn flag(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(row.get::<_, Option<i64>>(idx)?.is_some_and(|v| v != 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_store_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.db");
        assert!(SourceDatabase::open(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_table_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (x INTEGER);")
            .unwrap();

        let db = SourceDatabase::open(&path).unwrap();
        assert!(db.chats().is_err());
    }

    #[test]
    fn test_flags_decode_nonzero_and_null() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flags.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch(
                "CREATE TABLE attachment (ROWID INTEGER PRIMARY KEY, created_date INTEGER,
                     filename TEXT, mime_type TEXT, is_outgoing INTEGER, transfer_name TEXT);
                 INSERT INTO attachment VALUES (1, 0, 'a', NULL, 1, NULL);
                 INSERT INTO attachment VALUES (2, 0, 'b', NULL, NULL, NULL);
                 INSERT INTO attachment VALUES (3, 0, 'c', NULL, 5, NULL);",
            )
            .unwrap();

        let db = SourceDatabase::open(&path).unwrap();
        let mut rows = db.attachments().unwrap();
        rows.sort_by_key(|r| r.id);
        let flags: Vec<bool> = rows.iter().map(|r| r.is_outgoing).collect();
        assert_eq!(flags, vec![true, false, true]);
    }
}
