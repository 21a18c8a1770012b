//! Error types for offset grid loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or configuring an offset grid.
#[derive(Error, Debug)]
pub enum OffsetGridError {
    /// The grid resource could not be read.
    #[error("failed to read offset grid {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The byte length does not match the configured dimensions.
    #[error("offset grid size mismatch: expected {expected} bytes, got {actual}")]
    Format { expected: usize, actual: usize },

    /// The grid format configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Grid metadata could not be parsed.
    #[error("invalid grid metadata: {0}")]
    InvalidMetadata(String),
}

impl OffsetGridError {
    /// Create an Io error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a Format error.
    pub fn format(expected: usize, actual: usize) -> Self {
        Self::Format { expected, actual }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an InvalidMetadata error.
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }

    /// True for errors caused by an unreadable resource.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// True for errors caused by a malformed file.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

impl From<serde_yaml::Error> for OffsetGridError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::InvalidMetadata(err.to_string())
    }
}

/// Result type for offset grid operations.
pub type Result<T> = std::result::Result<T, OffsetGridError>;
