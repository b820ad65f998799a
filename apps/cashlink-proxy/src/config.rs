//! Service configuration loaded from the environment

use anyhow::{Context, Result};
use cashlink_domain::UpstreamConfig;
use tracing::info;

/// Configuration of the proxy service
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub upstream: UpstreamConfig,
    /// Full URL of the admin OTP endpoint
    pub otp_url: String,
    /// Bearer token for the admin OTP endpoint, if it requires one
    pub otp_admin_token: Option<String>,
}

impl ProxyConfig {
    /// Load the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from an arbitrary variable lookup
    ///
    /// `CASHLINK_API_KEY` and `CASHLINK_BASIC_CREDENTIAL` are required; every
    /// other variable has a logged default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or_default = |key: &str, default: &str| {
            var(key).unwrap_or_else(|| {
                info!("{} not set, using default: {}", key, default);
                default.to_string()
            })
        };

        let host = or_default("CASHLINK_HOST", "0.0.0.0");
        let port = or_default("CASHLINK_PORT", "3000")
            .parse::<u16>()
            .context("CASHLINK_PORT must be a valid port number")?;

        let base_url = or_default("CASHLINK_UPSTREAM_URL", "https://api.cashback.example.com");
        let api_key = var("CASHLINK_API_KEY").context("CASHLINK_API_KEY must be set")?;
        let app_version = or_default("CASHLINK_APP_VERSION", "1.0.0");
        let basic_credential = var("CASHLINK_BASIC_CREDENTIAL")
            .context("CASHLINK_BASIC_CREDENTIAL must be set (client_id:client_secret)")?;
        let token_endpoint = or_default("CASHLINK_TOKEN_ENDPOINT", "/oauth/token");

        let otp_url = or_default("CASHLINK_OTP_URL", "https://admin.cashback.example.com/otp");
        let otp_admin_token = var("CASHLINK_OTP_ADMIN_TOKEN");

        Ok(Self {
            host,
            port,
            upstream: UpstreamConfig::new(
                base_url,
                api_key,
                app_version,
                basic_credential,
                token_endpoint,
            ),
            otp_url,
            otp_admin_token,
        })
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
