use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::builder::{build_addresses, build_attachments, build_messages, build_threads};
use crate::db::SourceDatabase;
use crate::error::Result;
use crate::file_writer::{write_threads, JsonStyle};
use crate::linker::{link, LinkReport};
use crate::logging::OperationTimer;
use crate::metrics;

/// Outcome of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Distinct handles in the store
    pub addresses: usize,
    /// Linking counts
    pub links: LinkReport,
    /// Files written, in thread id order
    pub written: Vec<PathBuf>,
}

/// Runs the whole extract, link, write pipeline against one store.
pub struct ExportService {
    db: SourceDatabase,
    output_dir: PathBuf,
    style: JsonStyle,
}

impl ExportService {
    /// Open the store and prepare to write into `output_dir`.
    pub fn new(
        database_path: &Path,
        output_dir: impl Into<PathBuf>,
        style: JsonStyle,
    ) -> Result<Self> {
        let db = SourceDatabase::open(database_path)?;
        Ok(Self {
            db,
            output_dir: output_dir.into(),
            style,
        })
    }

    /// Export every thread. Nothing is written until the whole graph is
    /// built, and the first failure aborts the run.
    pub fn run(&self) -> Result<ExportSummary> {
        let started = Instant::now();

        let timer = OperationTimer::new("build_entities");
        let addresses = build_addresses(self.db.handles()?);
        let messages = build_messages(self.db.messages()?)?;
        let attachments = build_attachments(self.db.attachments()?)?;
        let mut threads = build_threads(&self.db.chats()?);
        timer.finish();
        info!(
            addresses = addresses.len(),
            messages = messages.remaining(),
            attachments = attachments.remaining(),
            threads = threads.len(),
            "Loaded {}",
            self.db.path().display()
        );

        let timer = OperationTimer::new("link_threads");
        let links = link(
            &mut threads,
            messages,
            attachments,
            &self.db.message_attachments()?,
            &self.db.chat_handles()?,
            &self.db.chat_messages()?,
        )?;
        timer.finish();
        report_links(&links);

        let unknown_participants = threads
            .values()
            .flat_map(|t| t.address_ids.iter())
            .filter(|id| !addresses.contains_key(*id))
            .count();
        if unknown_participants > 0 {
            debug!(unknown_participants, "Participants without a handle row");
        }

        let timer = OperationTimer::new("write_threads");
        let written = write_threads(&self.output_dir, threads, self.style)?;
        timer.finish();
        metrics::record_threads_written(written.len());
        metrics::record_export_duration(started.elapsed());
        info!("Wrote {} threads to {}", written.len(), self.output_dir.display());

        Ok(ExportSummary {
            addresses: addresses.len(),
            links,
            written,
        })
    }
}

fn report_links(links: &LinkReport) {
    metrics::record_placeholders("attachment", links.attachment_placeholders);
    metrics::record_placeholders("message", links.message_placeholders);
    metrics::record_orphans("attachment", links.orphan_attachments);
    metrics::record_orphans("message", links.orphan_messages);

    if links.attachment_placeholders + links.message_placeholders > 0 {
        warn!(
            attachments = links.attachment_placeholders,
            messages = links.message_placeholders,
            "Unresolved references exported as empty objects"
        );
    }
    if links.orphan_attachments + links.orphan_messages > 0 {
        info!(
            attachments = links.orphan_attachments,
            messages = links.orphan_messages,
            "Dropped records not referenced by any thread"
        );
    }
}
