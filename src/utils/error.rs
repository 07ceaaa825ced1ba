//! Error types for the report loading boundary
//!
//! The analytics engine itself never fails; these errors only surface while
//! reading the archive or fetching the live report.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching the live report
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the report endpoint
    #[error("Server returned status {0}")]
    Status(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Body was not a valid report document
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while reading the report archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Archive directory missing or unreadable
    #[error("Cannot read archive directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Single archive file unreadable
    #[error("Cannot read archive file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a report or list of reports
    #[error("Malformed report document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
