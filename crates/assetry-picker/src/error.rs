//! Error types for assetry-picker.

use assetry_client::ClientError;
use thiserror::Error;

/// Result type alias for picker operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading options or resolving identifiers.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A selection rule was violated.
    #[error(transparent)]
    Selection(#[from] assetry_core::Error),

    /// The masters API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// No identifier exists for the path and the hierarchy cannot generate one.
    #[error("no {hierarchy} identifier found for '{key}'")]
    IdentifierNotFound {
        /// Hierarchy name
        hierarchy: &'static str,
        /// Identifier key that missed
        key: String,
    },

    /// An operation needed a complete path.
    #[error("{hierarchy} path is incomplete: '{level}' is empty")]
    Incomplete {
        /// Hierarchy name
        hierarchy: &'static str,
        /// First empty level
        level: &'static str,
    },
}

impl Error {
    /// Returns whether retrying the same operation could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Selection(e) => e.is_retryable(),
            Error::Client(e) => e.is_retryable(),
            Error::IdentifierNotFound { .. } | Error::Incomplete { .. } => false,
        }
    }
}
