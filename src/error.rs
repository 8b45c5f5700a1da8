//! Error types for session result resolution.
//!
//! All errors implement `std::error::Error` and carry enough structured context
//! to decide between retrying, degrading, or substituting placeholder data.
//!
//! ## Error Categories
//!
//! - **Selection Errors**: no session of the requested kind exists for the year
//! - **Upstream Errors**: a required collection (sessions, positions, drivers) could not be fetched
//! - **Auxiliary Errors**: an optional collection (laps, intervals, official results) is missing
//! - **Parse Errors**: a provider response did not match the typed record it should carry
//! - **File Errors**: recorded fixtures or config files could not be read
//! - **Config Errors**: configuration values failed validation
//!
//! ## Recovery
//!
//! ```rust
//! use paddock::{Collection, ResultsError};
//!
//! let error = ResultsError::upstream_unavailable(Collection::Positions, "connection reset");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! assert!(error.falls_back_to_placeholder());
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::provider::Collection;

/// Result type alias for resolver operations.
pub type Result<T, E = ResultsError> = std::result::Result<T, E>;

/// Main error type for session result resolution.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResultsError {
    #[error("No {wanted} session found for {year}")]
    NoSessionFound { year: i32, wanted: String },

    #[error("Required {collection} data unavailable: {reason}")]
    UpstreamUnavailable {
        collection: Collection,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Auxiliary {collection} data missing: {reason}")]
    AuxiliaryDataMissing { collection: Collection, reason: String },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("File error: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {details}")]
    Config { details: String },
}

impl ResultsError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ResultsError::UpstreamUnavailable { .. } => true,
            ResultsError::AuxiliaryDataMissing { .. } => true,
            ResultsError::NoSessionFound { .. } => false,
            ResultsError::Parse { .. } => false,
            ResultsError::Io { .. } => false,
            ResultsError::Config { .. } => false,
        }
    }

    /// Returns whether the never-crash operations replace this error with placeholder data.
    ///
    /// Configuration errors are surfaced at construction time and never reach
    /// the placeholder path.
    pub fn falls_back_to_placeholder(&self) -> bool {
        !matches!(self, ResultsError::Config { .. })
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ResultsError::NoSessionFound { .. } => vec![
                "Check the requested year has started",
                "Request a different session type",
                "Use the all-sessions selection policy to include unfinished sessions",
            ],
            ResultsError::UpstreamUnavailable { .. } => vec![
                "Check network connectivity",
                "Verify the OpenF1 base URL",
                "Retry after a short delay",
            ],
            ResultsError::AuxiliaryDataMissing { .. } => vec![
                "Lap or interval data may not be published yet",
                "Retry once the session data is finalised",
            ],
            ResultsError::Parse { .. } => vec![
                "Check the provider response format",
                "Verify recorded fixtures match the OpenF1 schema",
            ],
            ResultsError::Io { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
            ResultsError::Config { .. } => vec![
                "Check configuration values",
                "Remove the key to fall back to its default",
            ],
        }
    }

    /// Helper constructor for session selection failures.
    pub fn no_session_found(year: i32, wanted: impl Into<String>) -> Self {
        ResultsError::NoSessionFound { year, wanted: wanted.into() }
    }

    /// Helper constructor for required collection failures.
    pub fn upstream_unavailable(collection: Collection, reason: impl Into<String>) -> Self {
        ResultsError::UpstreamUnavailable { collection, reason: reason.into(), source: None }
    }

    /// Helper constructor for required collection failures with source.
    pub fn upstream_unavailable_with_source(
        collection: Collection,
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        ResultsError::UpstreamUnavailable { collection, reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for missing auxiliary collections.
    pub fn auxiliary_missing(collection: Collection, reason: impl Into<String>) -> Self {
        ResultsError::AuxiliaryDataMissing { collection, reason: reason.into() }
    }

    /// Helper constructor for parse errors.
    pub fn parse(context: impl Into<String>, details: impl Into<String>) -> Self {
        ResultsError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        ResultsError::Io { path, source }
    }

    /// Helper constructor for configuration errors.
    pub fn config(details: impl Into<String>) -> Self {
        ResultsError::Config { details: details.into() }
    }

    /// Collection this error concerns, if any.
    pub fn collection(&self) -> Option<Collection> {
        match self {
            ResultsError::UpstreamUnavailable { collection, .. }
            | ResultsError::AuxiliaryDataMissing { collection, .. } => Some(*collection),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResultsError {
    fn from(err: std::io::Error) -> Self {
        ResultsError::Io { path: PathBuf::from("<unknown>"), source: err }
    }
}
