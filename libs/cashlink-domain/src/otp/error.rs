//! Domain errors for OTP lookups

use thiserror::Error;

/// Errors that can occur while fetching an OTP
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// The mobile number is not exactly ten digits
    #[error("Invalid mobile number")]
    InvalidMobile,

    /// The OTP service answered with a non-success status
    #[error("OTP service returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The OTP service could not be reached or answered with unreadable JSON
    #[error("OTP service unavailable: {0}")]
    Transport(String),
}

impl OtpError {
    /// Create a transport error with a message
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(status: u16, msg: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
        }
    }
}

/// Result type alias for OTP operations
pub type Result<T> = std::result::Result<T, OtpError>;
