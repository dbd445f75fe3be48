//! Error types for assetry-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for assetry-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in assetry-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration could not be found, parsed, or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem access failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A path argument was not a valid selection.
    #[error(transparent)]
    Selection(#[from] assetry_core::Error),

    /// Picker failure.
    #[error(transparent)]
    Picker(#[from] assetry_picker::Error),

    /// The masters API call failed.
    #[error(transparent)]
    Client(#[from] assetry_client::ClientError),

    /// No identifier could be resolved and one is required.
    #[error("no {hierarchy} identifier for '{path}': {reason}")]
    Unresolved {
        /// Hierarchy name
        hierarchy: &'static str,
        /// The selected path
        path: String,
        /// Why resolution failed
        reason: String,
    },

    /// Output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap an I/O error with the path it happened at.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether running the same command again might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Client(e) => e.is_retryable(),
            Self::Picker(e) => e.is_retryable(),
            _ => false,
        }
    }
}
