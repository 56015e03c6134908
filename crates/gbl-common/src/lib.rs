//! GBL Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the GBL ingest project.
//!
//! # Overview
//!
//! This crate provides common functionality used across all GBL workspace members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Tracing configuration and initialization
//! - **Sanitization**: String cleanup applied to incoming metadata values
//!
//! # Example
//!
//! ```no_run
//! use gbl_common::Result;
//! use gbl_common::sanitize::sanitize_string;
//!
//! fn clean_field(raw: &str) -> Result<String> {
//!     Ok(sanitize_string(raw))
//! }
//! ```

pub mod error;
pub mod logging;
pub mod sanitize;

// Re-export commonly used types
pub use error::{GblError, Result};
