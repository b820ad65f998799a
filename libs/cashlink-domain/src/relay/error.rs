//! Domain errors for relay operations
//!
//! These are proxy-side failures. An upstream answering with a non-2xx status
//! is not an error here: it is a normal outcome carried by
//! `NormalizedResponse`.

use thiserror::Error;

/// Errors that can occur while building or forwarding an upstream request
#[derive(Error, Debug)]
pub enum RelayError {
    /// The client request is malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A file payload is not valid base64
    #[error("Invalid base64 data for file '{filename}': {reason}")]
    InvalidBase64 { filename: String, reason: String },

    /// The request body could not be serialized
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The upstream could not be reached or its body could not be read
    #[error("Upstream request failed: {0}")]
    Transport(String),
}

impl RelayError {
    /// Create an invalid request error with a message
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an invalid base64 error for a file
    pub fn invalid_base64(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBase64 {
            filename: filename.into(),
            reason: reason.into(),
        }
    }

    /// Create an encoding error with a message
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Create a transport error with a message
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
