//! Domain errors for file intake
//!
//! Validation errors are resolved on the client and never reach the network.
//! Read and conversion errors surface from the asynchronous encoding step.

use thiserror::Error;

/// Errors that can occur while validating or encoding a file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// The declared MIME type is not in the allow-list
    #[error("Unsupported file type '{mime_type}'. Allowed types: {allowed}")]
    UnsupportedType { mime_type: String, allowed: String },

    /// The file exceeds the size ceiling
    #[error("File size ({size} bytes) exceeds the maximum of {max_display}")]
    FileTooLarge {
        size: u64,
        max: u64,
        max_display: String,
    },

    /// More files than one submission may carry
    #[error("Too many files: {count} selected, at most {max} allowed")]
    TooManyFiles { count: usize, max: usize },

    /// The underlying read operation failed
    #[error("Failed to read file: {0}")]
    ReadFailed(String),

    /// The read succeeded but produced no base64 content
    #[error("File conversion produced an empty payload")]
    EmptyPayload,

    /// The conversion result is not valid base64
    #[error("File conversion produced invalid base64: {0}")]
    InvalidEncoding(String),

    /// The encoded payload does not decode to the declared size
    #[error("Encoded payload decodes to {decoded} bytes, expected {expected}")]
    SizeMismatch { decoded: usize, expected: u64 },
}

impl IntakeError {
    /// Create a read failure error with a message
    pub fn read_failed(msg: impl Into<String>) -> Self {
        Self::ReadFailed(msg.into())
    }

    /// Create an invalid encoding error with a message
    pub fn invalid_encoding(msg: impl Into<String>) -> Self {
        Self::InvalidEncoding(msg.into())
    }

    /// Whether this error comes from the synchronous validation step
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType { .. } | Self::FileTooLarge { .. } | Self::TooManyFiles { .. }
        )
    }
}

/// Result type alias for intake operations
pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_names_allowed_set() {
        let err = IntakeError::UnsupportedType {
            mime_type: "text/plain".to_string(),
            allowed: "image/png, application/pdf".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("text/plain"));
        assert!(msg.contains("image/png, application/pdf"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_read_failed_is_not_validation() {
        let err = IntakeError::read_failed("permission denied");
        assert_eq!(err.to_string(), "Failed to read file: permission denied");
        assert!(!err.is_validation());
    }
}
