//! Error types for review loading
//!
//! Provides error handling for:
//! - Record validation (raw record → [`ReviewRecord`](crate::ReviewRecord))
//! - Dataset ingress (file → [`ReviewDataset`](crate::ReviewDataset))

use std::path::PathBuf;

/// Reasons a raw review record is rejected at the load boundary
///
/// Rejected records are excluded from every count; they never abort a load.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Record is not a JSON object
    #[error("record is not an object: {0}")]
    NotAnObject(String),

    /// Field present with the wrong JSON type
    #[error("malformed record: {0}")]
    Malformed(String),

    /// Required field absent or empty
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Sentiment outside positive/negative/neutral
    #[error("unknown sentiment: '{0}'")]
    UnknownSentiment(String),

    /// Rating outside the 1-5 scale
    #[error("rating out of range: {0}")]
    RatingOutOfRange(f64),

    /// Timestamp present but not RFC 3339
    #[error("invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// Timestamp as written in the record
        value: String,
        /// Parser message
        message: String,
    },
}

/// Errors while reading a dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Dataset is not valid YAML
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// File extension not recognised
    #[error("unsupported dataset format: '{0}'")]
    UnsupportedFormat(String),
}

impl DatasetError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
