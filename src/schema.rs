//! Source store schema definitions
//!
//! Table and column names read from the message store. Only the columns the
//! export needs are selected; everything else in a real store is ignored.

/// Contact addresses (phone numbers and email addresses)
pub mod handle {
    /// Table name
    pub const TABLE: &str = "handle";
    /// Primary key column
    pub const ROWID: &str = "ROWID";
    /// Raw address column
    pub const ID: &str = "id";
    /// Country code column
    pub const COUNTRY: &str = "country";
    /// Service name column
    pub const SERVICE: &str = "service";
}

/// Individual messages
pub mod message {
    /// Table name
    pub const TABLE: &str = "message";
    /// Primary key column
    pub const ROWID: &str = "ROWID";
    /// Body text column
    pub const TEXT: &str = "text";
    /// Owning handle column
    pub const HANDLE_ID: &str = "handle_id";
    /// Subject line column
    pub const SUBJECT: &str = "subject";
    /// Country code column
    pub const COUNTRY: &str = "country";
    /// Service name column
    pub const SERVICE: &str = "service";
    /// Seconds since the reference epoch
    pub const DATE: &str = "date";
    /// Outbound flag column
    pub const IS_FROM_ME: &str = "is_from_me";
}

/// File attachments
pub mod attachment {
    /// Table name
    pub const TABLE: &str = "attachment";
    /// Primary key column
    pub const ROWID: &str = "ROWID";
    /// Seconds since the reference epoch
    pub const CREATED_DATE: &str = "created_date";
    /// On-disk path column
    pub const FILENAME: &str = "filename";
    /// MIME type column
    pub const MIME_TYPE: &str = "mime_type";
    /// Outbound flag column
    pub const IS_OUTGOING: &str = "is_outgoing";
    /// Original file name column
    pub const TRANSFER_NAME: &str = "transfer_name";
}

/// Conversation threads
pub mod chat {
    /// Table name
    pub const TABLE: &str = "chat";
    /// Primary key column
    pub const ROWID: &str = "ROWID";
}

/// Message to attachment links
pub mod message_attachment_join {
    /// Table name
    pub const TABLE: &str = "message_attachment_join";
    /// Owning message column
    pub const MESSAGE_ID: &str = "message_id";
    /// Linked attachment column
    pub const ATTACHMENT_ID: &str = "attachment_id";
}

/// Chat participants
pub mod chat_handle_join {
    /// Table name
    pub const TABLE: &str = "chat_handle_join";
    /// Owning chat column
    pub const CHAT_ID: &str = "chat_id";
    /// Participant handle column
    pub const HANDLE_ID: &str = "handle_id";
}

/// Chat to message links
pub mod chat_message_join {
    /// Table name
    pub const TABLE: &str = "chat_message_join";
    /// Owning chat column
    pub const CHAT_ID: &str = "chat_id";
    /// Linked message column
    pub const MESSAGE_ID: &str = "message_id";
}
