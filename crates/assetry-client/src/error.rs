//! Error types for assetry-client.

use thiserror::Error;

/// Result type alias for assetry-client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the masters API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the bearer token.
    #[error("unauthorized: session token missing or expired")]
    Unauthorized,

    /// The requested record does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// Path of the missing resource
        resource: String,
    },

    /// Any other non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        /// Endpoint path
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("invalid response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path
        endpoint: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but lacked a required field.
    #[error("response from {endpoint} is missing '{field}'")]
    MissingField {
        /// Endpoint path
        endpoint: String,
        /// Missing field name
        field: &'static str,
    },

    /// Client configuration is unusable.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

impl ClientError {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        ClientError::Config {
            message: message.into(),
        }
    }

    /// Returns whether this error is retryable.
    ///
    /// Transport timeouts, connection failures, and 5xx responses are.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect(),
            ClientError::Status { status, .. } => *status >= 500,
            ClientError::Unauthorized
            | ClientError::NotFound { .. }
            | ClientError::Decode { .. }
            | ClientError::MissingField { .. }
            | ClientError::Config { .. } => false,
        }
    }
}
