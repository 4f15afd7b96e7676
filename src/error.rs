//! Error types for the chat-thread-export library.
//!
//! Every failure here is fatal for the run: the export either completes or
//! aborts. Referential gaps on the claimed side of a join are not errors and
//! never reach this module; they become placeholders in the linker.

use thiserror::Error;

/// Errors that can occur while exporting threads.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Store could not be opened or scanned (missing file, table or column)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A date offset that falls outside the representable calendar range
    #[error("Timestamp offset {offset}s is out of range")]
    TimestampOutOfRange {
        /// Seconds since the reference epoch
        offset: i64,
    },

    /// A join row whose owning record does not exist
    #[error("{table} references unknown id {id}")]
    DanglingReference {
        /// Join table holding the row
        table: &'static str,
        /// The missing owner id
        id: i64,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for Result with ExportError
pub type Result<T> = std::result::Result<T, ExportError>;
