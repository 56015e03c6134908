//! Ingest run loop
//!
//! Walks the intake directory, classifies each file by its source prefix,
//! drives the per-file pipeline, writes the report artifacts, and archives
//! the file. Files are handled one at a time; rows within a file in file
//! order. The only fatal condition is a missing intake directory.

use crate::archive::archive_file;
use crate::config::IngestConfig;
use crate::pipeline::FilePipeline;
use crate::report;
use crate::solr::SolrClient;
use chrono::Utc;
use gbl_common::{GblError, Result};
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Upload source a file came from, recognized by its filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePrefix {
    Dmf,
    Cgit,
    Gdrive,
}

impl SourcePrefix {
    /// Classify a filename by prefix. Files from unrecognized sources are
    /// skipped entirely: not processed, not reported, not archived.
    pub fn classify(file_name: &str) -> Option<Self> {
        if file_name.starts_with("dmf_") {
            Some(SourcePrefix::Dmf)
        } else if file_name.starts_with("cgit_") {
            Some(SourcePrefix::Cgit)
        } else if file_name.starts_with("gdrive_") {
            Some(SourcePrefix::Gdrive)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SourcePrefix::Dmf => "dmf_",
            SourcePrefix::Cgit => "cgit_",
            SourcePrefix::Gdrive => "gdrive_",
        }
    }
}

/// Aggregate counters for one ingest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub total_records: usize,
    pub ingested_records: usize,
}

/// Drives one sequential ingest run over the intake directory.
pub struct IngestOrchestrator {
    config: IngestConfig,
    pipeline: FilePipeline,
}

impl IngestOrchestrator {
    pub fn new(config: IngestConfig) -> Result<Self> {
        let solr = SolrClient::new(
            config.solr_url.clone(),
            Duration::from_secs(config.solr_timeout_secs),
        )
        .map_err(|err| GblError::Config(err.to_string()))?;

        Ok(Self {
            config,
            pipeline: FilePipeline::new(solr),
        })
    }

    /// Run the full ingest loop once.
    pub async fn run(&self) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        let upload_dir = self.config.upload_dir();

        if !upload_dir.is_dir() {
            let marker = "===================================";
            error!(
                "\n{}\n{} - {} does not exist. Halting.\n{}",
                marker,
                Utc::now().to_rfc2822(),
                upload_dir.display(),
                marker
            );
            return Err(GblError::MissingIntakeDir(upload_dir.display().to_string()));
        }

        // The rest of the tree is created on demand; only the intake
        // directory is a precondition.
        std::fs::create_dir_all(self.config.archive_dir())?;
        std::fs::create_dir_all(self.config.log_dir())?;
        std::fs::create_dir_all(self.config.error_dir())?;

        info!(run_id = %run_id, dir = %upload_dir.display(), "Starting ingest run");

        let mut summary = RunSummary::default();

        for file_name in list_files(&upload_dir)? {
            let Some(prefix) = SourcePrefix::classify(&file_name) else {
                debug!(file = %file_name, "Skipping file with unrecognized prefix");
                summary.files_skipped += 1;
                continue;
            };

            info!(file = %file_name, source = prefix.as_str(), "Ingesting upload file");

            let source_path = upload_dir.join(&file_name);
            let file_summary = self.pipeline.run_file(&source_path, &file_name).await;

            let timestamp = report::report_timestamp(Utc::now());
            report::write_log(&self.config.log_dir(), &file_summary, &timestamp)?;
            if file_summary.has_errors() {
                report::write_errors(&self.config.error_dir(), &file_summary, &timestamp)?;
            }

            archive_file(&source_path, &self.config.archive_dir().join(&file_name))?;

            summary.files_processed += 1;
            summary.total_records += file_summary.total_records;
            summary.ingested_records += file_summary.ingested_records;
        }

        info!(
            run_id = %run_id,
            files = summary.files_processed,
            skipped = summary.files_skipped,
            total = summary.total_records,
            ingested = summary.ingested_records,
            "Ingest run complete"
        );

        Ok(summary)
    }
}

/// Plain files in the intake directory, sorted by name for a stable order.
fn list_files(dir: &std::path::Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_recognized_prefixes() {
        assert_eq!(SourcePrefix::classify("dmf_maps.csv"), Some(SourcePrefix::Dmf));
        assert_eq!(SourcePrefix::classify("cgit_maps.csv"), Some(SourcePrefix::Cgit));
        assert_eq!(SourcePrefix::classify("gdrive_maps.csv"), Some(SourcePrefix::Gdrive));
    }

    #[test]
    fn test_classify_unrecognized_prefix() {
        assert_eq!(SourcePrefix::classify("maps.csv"), None);
        assert_eq!(SourcePrefix::classify("sftp_maps.csv"), None);
        // Prefix match is exact, including the underscore.
        assert_eq!(SourcePrefix::classify("dmfmaps.csv"), None);
    }

    #[test]
    fn test_list_files_sorted_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.csv"), "x").unwrap();
        std::fs::write(dir.path().join("a.csv"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let names = list_files(dir.path()).unwrap();
        assert_eq!(names, vec!["a.csv".to_string(), "b.csv".to_string()]);
    }
}
