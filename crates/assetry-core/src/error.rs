//! Error types for assetry-core.

use thiserror::Error;

/// Result type alias for assetry-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working with hierarchy selections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A level was written before all of its ancestors were filled.
    #[error("{hierarchy} level '{level}' is locked until '{missing}' is selected")]
    LevelLocked {
        /// Hierarchy name ("asset", "location")
        hierarchy: &'static str,
        /// Level that was written
        level: &'static str,
        /// First ancestor that is still empty
        missing: &'static str,
    },

    /// A level name did not match any level of the hierarchy.
    #[error("unknown {hierarchy} level: {name}")]
    UnknownLevel {
        /// Hierarchy name
        hierarchy: &'static str,
        /// The name that failed to parse
        name: String,
    },

    /// Input failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },
}

impl Error {
    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Returns whether retrying the same operation could succeed.
    ///
    /// Selection errors describe the input, so none of them are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::LevelLocked { .. } | Error::UnknownLevel { .. } | Error::Validation { .. } => {
                false
            }
        }
    }
}
