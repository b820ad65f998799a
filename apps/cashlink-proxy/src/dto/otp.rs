//! DTOs for the OTP endpoint

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for the OTP endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct OtpRequest {
    /// Ten-digit mobile number
    #[schema(example = "9876543210")]
    pub mobile: Option<String>,
}

/// Error body of the OTP endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct OtpErrorResponse {
    /// Always "Error"
    #[schema(example = "Error")]
    pub status: String,
    #[schema(example = "Invalid mobile number")]
    pub message: String,
}

impl OtpErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "Error".to_string(),
            message: message.into(),
        }
    }
}
