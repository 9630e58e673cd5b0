//! Error types for the Box View client.

use thiserror::Error;

/// Errors that can occur when using the Box View client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A parameter was missing or invalid. Raised before any request is sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Server answered with a status outside the expected success set.
    #[error("Box View API error (status {status}): {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Error message from the body, or the reason phrase.
        message: String,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a local file or writing a destination stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to deserialize response.
    #[error("Failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Invalid endpoint URL configured.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response format.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// HTTP status of a remote error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
