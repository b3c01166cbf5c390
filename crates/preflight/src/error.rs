//! Error types for preflight.
//!
//! This module defines all error types used throughout the preflight crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for preflight operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// The checklist data directory does not exist.
    #[error("checklist data directory not found: {path}")]
    DataDirMissing {
        /// Path that was expected to hold the checklist JSON files.
        path: PathBuf,
    },

    /// The checklist data directory contains no checklist files.
    #[error("no checklist JSON files found in {path}")]
    NoChecklists {
        /// Path that was scanned for checklist JSON files.
        path: PathBuf,
    },

    /// A checklist file could not be parsed.
    #[error("failed to parse checklist {path}: {source}")]
    ChecklistParse {
        /// Path to the malformed checklist file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The facet constants file could not be parsed.
    #[error("failed to parse constants file {path}: {source}")]
    ConstantsParse {
        /// Path to the malformed constants file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A selection code is not present in the facet catalog.
    #[error("unknown {facet} code '{code}' (run `preflight options` to list valid codes)")]
    UnknownFacetCode {
        /// Which facet the code was given for.
        facet: &'static str,
        /// The unrecognized code.
        code: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Output Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to move an artifact into the archive.
    #[error("failed to archive {path}: {source}")]
    Archive {
        /// Path of the artifact that couldn't be moved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// PDF assembly or writing failed.
    #[error("PDF output failed: {0}")]
    Pdf(#[from] lopdf::Error),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for preflight operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown-facet-code error.
    #[must_use]
    pub fn unknown_code(facet: &'static str, code: impl Into<String>) -> Self {
        Self::UnknownFacetCode {
            facet,
            code: code.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error indicates missing or empty input data.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::DataDirMissing { .. } | Self::NoChecklists { .. }
        )
    }
}
