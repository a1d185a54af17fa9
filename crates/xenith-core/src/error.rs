//! Error types for Xenith Core
//!
//! - Configuration loading and validation
//! - Analysis session phase transitions
//! - Pipeline failures

use std::path::PathBuf;

use xenith_review::{DatasetError, ProductType};

use crate::session::AnalysisPhase;

/// Main core error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Dataset has no corpus for the requested product line
    #[error("dataset has no corpus for product type '{0}'")]
    UnknownProductType(ProductType),

    /// Dataset could not be loaded
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session error
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid YAML
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension not recognised
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of range
    #[error("invalid value for {field}: {message}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    /// Create I/O error with path
    #[inline]
    #[must_use]
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create validation error
    #[inline]
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Analysis session errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Transition not in the phase sequence
    #[error("illegal phase transition: {from} -> {to}")]
    IllegalTransition {
        /// Current phase
        from: AnalysisPhase,
        /// Requested phase
        to: AnalysisPhase,
    },
}
