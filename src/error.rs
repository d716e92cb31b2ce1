//! Error types for envcheck operations.
//!
//! This module defines [`EnvcheckError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe failures are never errors: they are [`ProbeOutcome`] variants and
//!   end up as unsatisfied entries in the report
//! - Unparseable versions are never errors: the comparator fails open
//! - `EnvcheckError` covers catalog loading and report persistence only
//!
//! [`ProbeOutcome`]: crate::probe::ProbeOutcome

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for envcheck operations.
#[derive(Debug, Error)]
pub enum EnvcheckError {
    /// Catalog descriptor not found at the given location.
    #[error("Catalog not found: {path}")]
    CatalogNotFound { path: PathBuf },

    /// Failed to parse a catalog descriptor.
    #[error("Failed to parse catalog at {path}: {message}")]
    CatalogParseError { path: PathBuf, message: String },

    /// Catalog structure or values are invalid.
    #[error("Invalid catalog: {message}")]
    CatalogValidationError { message: String },

    /// Two catalog entries share the same key.
    #[error("Duplicate catalog entry key: {key}")]
    DuplicateEntry { key: String },

    /// The report artifact could not be written.
    #[error("Failed to write report to {path}: {source}")]
    ReportPersistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envcheck operations.
pub type Result<T> = std::result::Result<T, EnvcheckError>;
