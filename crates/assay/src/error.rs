//! Error types for the assay library.

use std::path::PathBuf;
use thiserror::Error;

/// Broad class of a failure, used by callers to decide who is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Wrong or unsupported input, rejected before any analysis.
    Input,
    /// The input could not be parsed into tables.
    Parse,
    /// Anything else.
    Internal,
}

/// Main error type for assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File kind not supported (by any loader, or by the requested operation).
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The format is known but its loader was compiled out.
    #[error("{format} support not enabled. Rebuild with --features {feature}")]
    FeatureDisabled {
        format: &'static str,
        feature: &'static str,
    },

    /// Baseline and current inputs are of different kinds.
    #[error("Baseline and current files must be the same kind (got {baseline} and {current})")]
    MismatchedSources { baseline: String, current: String },

    /// A file could not be parsed into tables.
    #[error("Could not parse '{file}': {message}")]
    Parse { file: String, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the in-memory SQL engine.
    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// A loaded table does not have a rectangular shape.
    #[error("Malformed table: {0}")]
    Shape(String),

    /// Empty file or no columns to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected failure while analyzing a file.
    #[error("An unexpected error occurred while processing '{file}': {reason}")]
    Internal { file: String, reason: String },
}

impl AssayError {
    /// Build a parse error for the named file.
    pub fn parse(file: impl Into<String>, message: impl ToString) -> Self {
        AssayError::Parse {
            file: file.into(),
            message: message.to_string(),
        }
    }

    /// Classify this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            AssayError::UnsupportedFormat(_)
            | AssayError::FeatureDisabled { .. }
            | AssayError::MismatchedSources { .. }
            | AssayError::Config(_) => ErrorClass::Input,
            AssayError::Parse { .. }
            | AssayError::Csv(_)
            | AssayError::Json(_)
            | AssayError::Sql(_)
            | AssayError::EmptyData(_) => ErrorClass::Parse,
            AssayError::Io { .. } | AssayError::Shape(_) | AssayError::Internal { .. } => {
                ErrorClass::Internal
            }
        }
    }

    /// Attach the file name to a fault that is not the caller's.
    pub fn in_file(self, file: &str) -> Self {
        match self {
            AssayError::Shape(reason) => AssayError::Internal {
                file: file.to_string(),
                reason,
            },
            other => other,
        }
    }

    /// Whether the caller supplied bad input (as opposed to an internal fault).
    pub fn is_client_fault(&self) -> bool {
        matches!(self.class(), ErrorClass::Input | ErrorClass::Parse)
    }
}

/// Result type alias for assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;
