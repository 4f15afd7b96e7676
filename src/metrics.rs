//! Metrics emitted through the `metrics` facade.
//!
//! Nothing installs a recorder by default, so every call is a no-op unless an
//! embedding application sets one up.

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Rows decoded per source table
pub const ROWS_READ_TOTAL: &str = "thread_export_rows_read_total";
/// Join references that resolved to the `{}` placeholder
pub const PLACEHOLDERS_TOTAL: &str = "thread_export_placeholders_total";
/// Records never referenced by any join row
pub const ORPHANS_TOTAL: &str = "thread_export_orphans_total";
/// Thread files written
pub const THREADS_WRITTEN_TOTAL: &str = "thread_export_threads_written_total";
/// Wall time of a full export
pub const EXPORT_DURATION: &str = "thread_export_duration_seconds";

/// Register metric descriptions with the installed recorder.
pub fn describe() {
    describe_counter!(ROWS_READ_TOTAL, "Rows decoded per source table");
    describe_counter!(PLACEHOLDERS_TOTAL, "Join references resolved to an empty placeholder");
    describe_counter!(ORPHANS_TOTAL, "Records dropped because no join row referenced them");
    describe_counter!(THREADS_WRITTEN_TOTAL, "Thread documents written to disk");
    describe_histogram!(EXPORT_DURATION, "Duration of a full export run");
}

/// Count rows read from `table`.
pub fn record_rows_read(table: &'static str, rows: usize) {
    counter!(ROWS_READ_TOTAL, "table" => table).increment(rows as u64);
}

/// Count placeholders of a given record kind (`message` or `attachment`).
pub fn record_placeholders(kind: &'static str, count: usize) {
    counter!(PLACEHOLDERS_TOTAL, "kind" => kind).increment(count as u64);
}

/// Count orphans of a given record kind.
pub fn record_orphans(kind: &'static str, count: usize) {
    counter!(ORPHANS_TOTAL, "kind" => kind).increment(count as u64);
}

/// Count written thread files.
pub fn record_threads_written(count: usize) {
    counter!(THREADS_WRITTEN_TOTAL).increment(count as u64);
}

/// Record the duration of an export run.
pub fn record_export_duration(elapsed: Duration) {
    histogram!(EXPORT_DURATION).record(elapsed.as_secs_f64());
}
