//! Error types for config loading.
//!
//! Resolution itself never fails; only the declarative config loader can
//! observe malformed input.

use std::path::PathBuf;

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a variant configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document is not valid JSON.
    #[error("Config parse error: {message}")]
    Parse { message: String },

    /// The document parsed but is structurally malformed (e.g. a non-object
    /// where an object was required).
    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    /// File I/O error.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an invalid-config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
