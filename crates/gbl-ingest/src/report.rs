//! Per-run report artifacts
//!
//! Every processed file gets a log report; files with failed rows (or a file
//! that could not be parsed at all) additionally get an error report. Both
//! are plain-text, written once with overwrite semantics, and named
//! `<file>_<YYYYMMDDHHMMSS>.{log,error}.txt`.

use crate::pipeline::IngestSummary;
use chrono::{DateTime, Utc};
use gbl_common::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Timestamp component of report filenames.
pub fn report_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// Write the log report for one processed file. Returns the written path.
pub fn write_log(log_dir: &Path, summary: &IngestSummary, timestamp: &str) -> Result<PathBuf> {
    let path = log_dir.join(format!("{}_{}.log.txt", summary.file_name, timestamp));
    let content = format!(
        "{}: Total ingest records: {}, ingested {} records.",
        summary.file_name, summary.total_records, summary.ingested_records
    );
    std::fs::write(&path, content)?;

    info!(path = %path.display(), "Wrote log report");
    Ok(path)
}

/// Write the error report for one processed file. Returns the written path.
pub fn write_errors(error_dir: &Path, summary: &IngestSummary, timestamp: &str) -> Result<PathBuf> {
    let path = error_dir.join(format!("{}_{}.error.txt", summary.file_name, timestamp));
    let content = format!("{}\n{}", summary.file_name, summary.error_text);
    std::fs::write(&path, content)?;

    info!(path = %path.display(), "Wrote error report");
    Ok(path)
}
