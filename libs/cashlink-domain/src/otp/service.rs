//! OTP service - Mobile validation and provider lookup

use serde_json::Value;
use tracing::{info, warn};

use super::{MobileNumber, OtpError, OtpProvider};

/// Service fetching one-time-passwords from an external provider
pub struct OtpService<P> {
    provider: P,
}

impl<P> OtpService<P>
where
    P: OtpProvider,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Validate `mobile` and fetch its OTP
    ///
    /// # Errors
    ///
    /// - `OtpError::InvalidMobile` if `mobile` is not exactly ten digits; the
    ///   provider is not called
    /// - any error of the provider
    pub async fn fetch(&self, mobile: &str) -> Result<Value, OtpError> {
        let mobile = MobileNumber::parse(mobile).map_err(|err| {
            warn!("Rejected OTP request with an invalid mobile number");
            err
        })?;

        let value = self.provider.fetch_otp(&mobile).await?;
        info!(mobile = %mask(&mobile), "Fetched OTP");
        Ok(value)
    }
}

/// Keep only the last four digits for logs
fn mask(mobile: &MobileNumber) -> String {
    let digits = mobile.as_str();
    format!("******{}", &digits[digits.len() - 4..])
}
