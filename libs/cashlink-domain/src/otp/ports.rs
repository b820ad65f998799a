//! Port for the external OTP provider

use serde_json::Value;
use std::future::Future;

use super::{entity::MobileNumber, error::OtpError};

/// Port for fetching the current OTP of a mobile number
///
/// Implementations must return the provider's JSON answer untouched on
/// success, `OtpError::Upstream` for non-success statuses and
/// `OtpError::Transport` when the provider cannot be reached.
pub trait OtpProvider: Send + Sync {
    fn fetch_otp(
        &self,
        mobile: &MobileNumber,
    ) -> impl Future<Output = Result<Value, OtpError>> + Send;
}
