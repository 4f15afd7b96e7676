//! Chat Thread Export - Message Store to JSON
//!
//! Reads an iMessage-style `sms.db` and writes one JSON document per
//! conversation thread, with messages, attachments and participant ids.
//!
//! # Pipeline
//!
//! - Scan the seven source tables into typed rows
//! - Build addresses, messages, attachments and threads
//! - Link attachments into messages and messages into threads
//! - Write `thread_<id>.json` for every thread

/// Entity builders and working sets
pub mod builder;
/// Configuration management
pub mod config;
/// Read-only source store access
pub mod db;
/// Error types
pub mod error;
/// Thread document output
pub mod file_writer;
/// Join-table linking
pub mod linker;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Source schema definitions
pub mod schema;
/// End-to-end export orchestration
pub mod service;
/// Reference-epoch date conversion
pub mod timestamp;

// Re-export key components for easier access
pub use config::AppConfig;
pub use db::SourceDatabase;
pub use error::{ExportError, Result};
pub use models::{Attachment, Claimed, Message, Thread, ThreadDocument};
pub use service::{ExportService, ExportSummary};
