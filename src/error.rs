//! Unified error handling for the stratum crate
//!
//! The analytics derivations never fail; they degrade to empty results.
//! Errors only arise at the boundary: reading the archive, fetching the live
//! report, and loading configuration or catalogs.
//!
//! # Architecture
//!
//! - [`StratumErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use stratum::error::{Error, StratumErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     if err.is_recoverable() {
//!         eprintln!("Falling back to archive: {}", err.localized_desc());
//!     } else {
//!         eprintln!("Fatal error: {}", err);
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::utils::error::{ArchiveError, FetchError};

/// Common trait for all stratum error types
pub trait StratumErrorTrait: std::error::Error {
    /// Check if this error is recoverable (the caller may fall back or retry later)
    fn is_recoverable(&self) -> bool;

    /// Get localized description for user-facing messages
    fn localized_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Live report fetch failures
    Network,
    /// Malformed documents and configuration syntax
    Parsing,
    /// Archive and file I/O
    Storage,
    /// Invalid configuration or catalog values
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get localized description for the category
    pub fn localized_desc(&self) -> String {
        match self {
            Self::Network => crate::i18n::t!("errors.category.network").to_string(),
            Self::Parsing => crate::i18n::t!("errors.category.parsing").to_string(),
            Self::Storage => crate::i18n::t!("errors.category.storage").to_string(),
            Self::Config => crate::i18n::t!("errors.category.config").to_string(),
            Self::Other => crate::i18n::t!("errors.category.other").to_string(),
        }
    }
}

impl StratumErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Status(_) | Self::Timeout => true,
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Http(e) => format!("{}: {e}", crate::i18n::t!("errors.fetch.http")),
            Self::Status(code) => crate::i18n::t!("errors.fetch.status", code = code).to_string(),
            Self::Timeout => crate::i18n::t!("errors.fetch.timeout").to_string(),
            Self::Decode(msg) => format!("{}: {msg}", crate::i18n::t!("errors.fetch.decode")),
            Self::InvalidUrl(url) => format!("{}: {url}", crate::i18n::t!("errors.fetch.invalid_url")),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Decode(_) => ErrorCategory::Parsing,
            Self::InvalidUrl(_) => ErrorCategory::Config,
            _ => ErrorCategory::Network,
        }
    }
}

impl StratumErrorTrait for ArchiveError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Directory { path, .. } => {
                format!("{}: {}", crate::i18n::t!("errors.archive.directory"), path.display())
            }
            Self::File { path, .. } => {
                format!("{}: {}", crate::i18n::t!("errors.archive.file"), path.display())
            }
            Self::Malformed { path, .. } => {
                format!("{}: {}", crate::i18n::t!("errors.archive.malformed"), path.display())
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Malformed { .. } => ErrorCategory::Parsing,
            Self::Directory { .. } | Self::File { .. } => ErrorCategory::Storage,
        }
    }
}

/// Unified error type for the stratum crate
#[derive(Error, Debug)]
pub enum Error {
    /// Live report fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Archive loading errors
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StratumErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Archive(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Toml(_) | Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Fetch(e) => e.localized_desc(),
            Self::Archive(e) => e.localized_desc(),
            Self::Io(e) => format!("{}: {e}", crate::i18n::t!("errors.io.error")),
            Self::Toml(e) => format!("{}: {e}", crate::i18n::t!("errors.toml.error")),
            Self::Config(msg) => format!("{}: {msg}", crate::i18n::t!("errors.config.error")),
            Self::Other { context, .. } => context.clone(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Archive(e) => e.category(),
            Self::Io(_) => ErrorCategory::Storage,
            Self::Toml(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
