//! File writing for thread export.
//!
//! Each thread becomes `thread_<id>.json` inside the output directory. Files
//! are truncated and rewritten in place; anything else already in the
//! directory is left alone.

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::builder::Threads;
use crate::error::Result;
use crate::models::{RowId, Thread, ThreadDocument};

/// JSON layout of written files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// Single line, no extra whitespace
    #[default]
    Compact,
    /// Indented, one field per line
    Pretty,
}

/// Create the output directory if it is missing.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir).inspect_err(|e| error!("Cannot create {}: {}", dir.display(), e))?;
    Ok(())
}

/// File name for a thread, e.g. `thread_12.json`.
#[must_use]
pub fn thread_file_name(id: RowId) -> String {
    format!("thread_{id}.json")
}

/// Serialize a single thread, overwriting any existing file.
pub fn write_thread(dir: &Path, id: RowId, thread: Thread, style: JsonStyle) -> Result<PathBuf> {
    let path = dir.join(thread_file_name(id));
    let file =
        File::create(&path).inspect_err(|e| error!("Cannot open {}: {}", path.display(), e))?;
    let mut writer = BufWriter::new(file);

    let document = ThreadDocument::from(thread);
    match style {
        JsonStyle::Compact => serde_json::to_writer(&mut writer, &document)?,
        JsonStyle::Pretty => serde_json::to_writer_pretty(&mut writer, &document)?,
    }
    writer.flush()?;

    debug!(thread_id = id, messages = document.messages.len(), "Wrote {}", path.display());
    Ok(path)
}

/// Write every thread in ascending id order.
///
/// Stops at the first failure; files written before it stay on disk.
pub fn write_threads(dir: &Path, threads: Threads, style: JsonStyle) -> Result<Vec<PathBuf>> {
    ensure_output_dir(dir)?;

    threads
        .into_iter()
        .map(|(id, thread)| write_thread(dir, id, thread, style))
        .collect()
}
