//! Reqwest OTP Client Implementation
//!
//! Fetches the current one-time-password of a mobile number from the external
//! admin endpoint with `GET {endpoint}?mobile={mobile}`.

use cashlink_domain::otp::{MobileNumber, OtpError, OtpProvider};
use reqwest::Client;
use serde_json::Value;
use tracing::{error, instrument, warn};

/// reqwest-based implementation of the OtpProvider port
#[derive(Clone)]
pub struct ReqwestOtpClient {
    client: Client,
    endpoint: String,
    admin_token: Option<String>,
}

impl ReqwestOtpClient {
    /// Create a new OTP client
    ///
    /// # Arguments
    ///
    /// * `client` - reqwest client to send requests with
    /// * `endpoint` - Full URL of the admin OTP endpoint
    /// * `admin_token` - Optional bearer token for the admin endpoint
    pub fn new(client: Client, endpoint: impl Into<String>, admin_token: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            admin_token,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl OtpProvider for ReqwestOtpClient {
    #[instrument(skip(self, mobile), fields(endpoint = %self.endpoint))]
    fn fetch_otp(
        &self,
        mobile: &MobileNumber,
    ) -> impl std::future::Future<Output = Result<Value, OtpError>> + Send {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let admin_token = self.admin_token.clone();
        let mobile = mobile.as_str().to_string();

        async move {
            let mut builder = client.get(&endpoint).query(&[("mobile", mobile.as_str())]);
            if let Some(token) = admin_token {
                builder = builder.bearer_auth(token);
            }

            let response = builder.send().await.map_err(|err| {
                error!(error = ?err, "Failed to reach OTP service");
                OtpError::transport(err.to_string())
            })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "OTP service rejected the request");
                return Err(OtpError::upstream(status.as_u16(), error_message(&body, status)));
            }

            response.json::<Value>().await.map_err(|err| {
                error!(error = ?err, "OTP service returned an unreadable body");
                OtpError::transport(format!("Invalid JSON from OTP service: {}", err))
            })
        }
    }
}

/// Prefer the provider's own `message` field, fall back to the status text
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            format!(
                "OTP service responded with {}",
                status.canonical_reason().unwrap_or("an error")
            )
        })
}
