//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Ingest Configuration Constants
// ============================================================================

/// Default base directory for the intake/archive/report tree.
pub const DEFAULT_BASE_DIR: &str = "/opt/sftp/geodata";

/// Default Solr core endpoint.
pub const DEFAULT_SOLR_URL: &str = "http://localhost:8983/solr/geoblacklight";

/// Default timeout for add/commit calls, in seconds.
pub const DEFAULT_SOLR_TIMEOUT_SECS: u64 = 30;

/// Ingest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Base directory; `Upload/`, `Archive/`, and `Report/` hang off it.
    pub base_dir: PathBuf,

    /// Solr core URL documents are submitted to.
    pub solr_url: String,

    /// Timeout for each add/commit call.
    pub solr_timeout_secs: u64,
}

impl IngestConfig {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = IngestConfig {
            base_dir: std::env::var("GBL_INGEST_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_BASE_DIR)),
            solr_url: std::env::var("GBL_SOLR_URL")
                .unwrap_or_else(|_| DEFAULT_SOLR_URL.to_string()),
            solr_timeout_secs: std::env::var("GBL_SOLR_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SOLR_TIMEOUT_SECS),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.solr_url.is_empty() {
            anyhow::bail!("Solr URL cannot be empty");
        }

        if self.solr_timeout_secs == 0 {
            anyhow::bail!("Solr timeout must be greater than 0");
        }

        Ok(())
    }

    /// Intake directory; must exist before a run starts.
    pub fn upload_dir(&self) -> PathBuf {
        self.base_dir.join("Upload")
    }

    /// Processed files are moved here.
    pub fn archive_dir(&self) -> PathBuf {
        self.base_dir.join("Archive")
    }

    /// Per-file log reports.
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("Report").join("Logs")
    }

    /// Per-file error reports.
    pub fn error_dir(&self) -> PathBuf {
        self.base_dir.join("Report").join("Errors")
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            solr_url: DEFAULT_SOLR_URL.to_string(),
            solr_timeout_secs: DEFAULT_SOLR_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_layout() {
        let config = IngestConfig {
            base_dir: PathBuf::from("/data/geo"),
            ..IngestConfig::default()
        };
        assert_eq!(config.upload_dir(), PathBuf::from("/data/geo/Upload"));
        assert_eq!(config.archive_dir(), PathBuf::from("/data/geo/Archive"));
        assert_eq!(config.log_dir(), PathBuf::from("/data/geo/Report/Logs"));
        assert_eq!(config.error_dir(), PathBuf::from("/data/geo/Report/Errors"));
    }

    #[test]
    fn test_validate_rejects_empty_solr_url() {
        let config = IngestConfig {
            solr_url: String::new(),
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = IngestConfig {
            solr_timeout_secs: 0,
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
