use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use chat_thread_export::config::AppConfig;
use chat_thread_export::logging::init_logging;
use chat_thread_export::metrics;
use chat_thread_export::service::ExportService;

/// Export every conversation in sms.db to threads/thread_<id>.json
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = init_logging(
        Some(config.log_level().as_str()),
        config.logging.file_path.as_deref().map(Path::new),
    )?;
    metrics::describe();

    info!("Starting chat-thread-export");

    let database_path = config.database_path();
    let service = ExportService::new(&database_path, config.output_dir(), config.json_style())
        .with_context(|| format!("Failed to open message store at {}", database_path.display()))?;

    let summary = service.run().context("Export failed")?;
    info!(
        threads = summary.written.len(),
        addresses = summary.addresses,
        "Export complete"
    );

    Ok(())
}
