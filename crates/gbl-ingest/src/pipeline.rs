//! Per-file ingest pipeline
//!
//! Drives one upload file through parse, per-row validation, transformation,
//! and submission, and aggregates the counters and error text consumed by the
//! report writer. Row-level failures never abort the file; a file-level parse
//! failure yields a 0/0 summary with a synthetic error entry.

use crate::parser;
use crate::solr::SolrClient;
use crate::transform::transform;
use crate::validate::validate_record;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Counters and error text accumulated while processing one upload file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub file_name: String,
    pub total_records: usize,
    pub ingested_records: usize,
    /// Accumulated operator-facing error entries.
    pub error_text: String,
    /// Set when the file itself could not be parsed.
    pub file_error: bool,
}

impl IngestSummary {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Append one row's error entry. `row` is the physical CSV line number
    /// (1-based data row index plus the header line).
    pub fn record_error(&mut self, row: usize, message: &str) {
        self.error_text.push_str(&format!("row {}: {}\n\n", row, message));
    }

    /// Whether this file needs an error report in addition to the log.
    pub fn has_errors(&self) -> bool {
        self.total_records != self.ingested_records || self.file_error
    }
}

/// Pipeline over the rows of a single upload file.
pub struct FilePipeline {
    solr: SolrClient,
}

impl FilePipeline {
    pub fn new(solr: SolrClient) -> Self {
        Self { solr }
    }

    /// Process every row of one upload file, in file order.
    ///
    /// Always returns a summary; every failure below the run level is folded
    /// into it rather than propagated.
    pub async fn run_file(&self, path: &Path, file_name: &str) -> IngestSummary {
        let start = Instant::now();
        let mut summary = IngestSummary::new(file_name);

        info!("Processing {}", file_name);

        let records = match parser::parse_file(path) {
            Ok(records) => records,
            Err(err) => {
                warn!(file = file_name, error = %err, "Upload file could not be parsed");
                summary.file_error = true;
                summary
                    .error_text
                    .push_str(&format!("{} could not be read. {}", file_name, err));
                return summary;
            },
        };

        let progress = ProgressBar::new(records.len() as u64);
        progress.set_message(file_name.to_string());

        for (i, record) in records.iter().enumerate() {
            // Report entries use the physical CSV line number (header is line 1).
            let line = i + 2;
            debug!("Processing row {}", i + 1);

            let outcome = validate_record(record);
            if !outcome.is_valid() {
                summary.record_error(line, &outcome.report());
            } else {
                let doc = transform(record);
                match self.solr.submit(&doc).await {
                    Ok(()) => summary.ingested_records += 1,
                    Err(err) => {
                        summary.record_error(
                            line,
                            &format!(
                                "There was an error committing this record to solr. Message: {}",
                                err
                            ),
                        );
                    },
                }
            }

            summary.total_records += 1;
            progress.inc(1);
        }

        progress.finish_and_clear();

        info!(
            file = file_name,
            total = summary.total_records,
            ingested = summary.ingested_records,
            elapsed_secs = start.elapsed().as_secs_f64(),
            "File pipeline complete"
        );

        summary
    }
}
