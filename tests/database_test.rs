use rusqlite::Connection;
use tempfile::tempdir;

use chat_thread_export::db::SourceDatabase;
use chat_thread_export::models::{HandleRow, JoinRow};

#[test]
fn test_scans_select_columns_by_name() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("sms.db");

    // Extra columns and a different column order than the real store
    Connection::open(&db_path)
        .expect("Failed to create store")
        .execute_batch(
            "CREATE TABLE handle (uncanonicalized_id TEXT, service TEXT, id TEXT,
                 ROWID INTEGER PRIMARY KEY, country TEXT);
             INSERT INTO handle VALUES (NULL, 'SMS', '+15550001111', 4, 'ca');
             CREATE TABLE chat_message_join (message_date INTEGER, message_id INTEGER,
                 chat_id INTEGER);
             INSERT INTO chat_message_join VALUES (0, 100, 1);
             INSERT INTO chat_message_join VALUES (0, 101, 1);",
        )
        .expect("Failed to create schema");

    let db = SourceDatabase::open(&db_path).expect("Failed to open store");

    assert_eq!(
        db.handles().unwrap(),
        vec![HandleRow {
            id: 4,
            address: Some("+15550001111".to_string()),
            country: Some("ca".to_string()),
            service: Some("SMS".to_string()),
        }]
    );

    let joins = db.chat_messages().unwrap();
    assert_eq!(
        joins,
        vec![
            JoinRow { owner_id: 1, member_id: 100 },
            JoinRow { owner_id: 1, member_id: 101 },
        ]
    );
}

#[test]
fn test_message_scan_keeps_nulls() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("sms.db");

    Connection::open(&db_path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE message (ROWID INTEGER PRIMARY KEY, text TEXT, handle_id INTEGER,
                 subject TEXT, country TEXT, service TEXT, date INTEGER, is_from_me INTEGER);
             INSERT INTO message VALUES (1, NULL, 0, NULL, NULL, NULL, -60, 1);",
        )
        .unwrap();

    let db = SourceDatabase::open(&db_path).unwrap();
    let rows = db.messages().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, None);
    assert_eq!(rows[0].date, -60);
    assert!(rows[0].is_from_me);
}

#[test]
fn test_null_handle_id_decodes_as_none() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("sms.db");

    Connection::open(&db_path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE message (ROWID INTEGER PRIMARY KEY, text TEXT, handle_id INTEGER,
                 subject TEXT, country TEXT, service TEXT, date INTEGER, is_from_me INTEGER);
             INSERT INTO message VALUES (1, 'hi', NULL, NULL, NULL, 'SMS', 0, 0);
             INSERT INTO message VALUES (2, 'yo', 7, NULL, NULL, 'SMS', 0, 0);",
        )
        .unwrap();

    let db = SourceDatabase::open(&db_path).unwrap();
    let mut rows = db.messages().unwrap();
    rows.sort_by_key(|r| r.id);
    assert_eq!(rows[0].handle_id, None);
    assert_eq!(rows[1].handle_id, Some(7));
}

#[test]
fn test_null_date_is_fatal() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("sms.db");

    Connection::open(&db_path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE attachment (ROWID INTEGER PRIMARY KEY, created_date INTEGER,
                 filename TEXT, mime_type TEXT, is_outgoing INTEGER, transfer_name TEXT);
             INSERT INTO attachment VALUES (1, NULL, 'a.png', NULL, 0, NULL);",
        )
        .unwrap();

    let db = SourceDatabase::open(&db_path).unwrap();
    assert!(db.attachments().is_err());
}
