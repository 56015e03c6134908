//! GBL Ingest Library
//!
//! Batch ingestion of GeoBlacklight metadata CSV files into a Solr index.
//!
//! Upload files land in an intake directory, are validated row by row
//! against the GeoBlacklight field schema, transformed into Solr documents,
//! and submitted one at a time. Each processed file produces a log report,
//! an error report when any row failed, and is then archived.
//!
//! # Example
//!
//! ```no_run
//! use gbl_ingest::config::IngestConfig;
//! use gbl_ingest::orchestrator::IngestOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::load()?;
//!     let orchestrator = IngestOrchestrator::new(config)?;
//!     orchestrator.run().await?;
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod config;
pub mod orchestrator;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod solr;
pub mod transform;
pub mod validate;

pub use config::IngestConfig;
pub use orchestrator::{IngestOrchestrator, RunSummary, SourcePrefix};
pub use pipeline::{FilePipeline, IngestSummary};
pub use solr::{SolrClient, SubmitError};
