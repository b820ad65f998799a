//! Upstream configuration
//!
//! Fixed collaborator settings for the third-party cashback API. The value is
//! built once at startup and injected into the relay; it is never mutated.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Default header carrying the API key on every upstream request
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Default header carrying the client application version
pub const DEFAULT_APP_VERSION_HEADER: &str = "app-version";

/// Immutable configuration of the upstream cashback API
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL every endpoint is appended to (e.g. "https://api.cashback.example")
    pub base_url: String,
    /// API key sent on every request
    pub api_key: String,
    /// Header name for the API key
    pub api_key_header: String,
    /// Application version sent on every request
    pub app_version: String,
    /// Header name for the application version
    pub app_version_header: String,
    /// Plain `client_id:client_secret` used for the token-issuance endpoint
    pub basic_credential: String,
    /// Endpoint that issues access tokens; requests to it use Basic auth
    pub token_endpoint: String,
}

impl UpstreamConfig {
    /// Create a configuration with the default header names
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        app_version: impl Into<String>,
        basic_credential: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            app_version: app_version.into(),
            app_version_header: DEFAULT_APP_VERSION_HEADER.to_string(),
            basic_credential: basic_credential.into(),
            token_endpoint: token_endpoint.into(),
        }
    }

    /// Join the base URL and an endpoint with exactly one slash between them
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Whether `endpoint` is the token-issuance endpoint
    ///
    /// Leading slashes and any query string are ignored for the comparison.
    pub fn is_token_endpoint(&self, endpoint: &str) -> bool {
        let path = endpoint.split('?').next().unwrap_or(endpoint);
        path.trim_start_matches('/') == self.token_endpoint.trim_start_matches('/')
    }

    /// The Basic credential, base64-encoded for the Authorization header
    pub fn encoded_basic_credential(&self) -> String {
        STANDARD.encode(self.basic_credential.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> UpstreamConfig {
        UpstreamConfig::new(
            "https://api.cashback.test/",
            "key",
            "1.0.0",
            "client:secret",
            "/oauth/token",
        )
    }

    #[test]
    fn test_url_for_joins_with_single_slash() {
        let config = config();
        assert_eq!(
            config.url_for("/v1/invoices"),
            "https://api.cashback.test/v1/invoices"
        );
        assert_eq!(
            config.url_for("v1/invoices"),
            "https://api.cashback.test/v1/invoices"
        );
    }

    #[test]
    fn test_token_endpoint_detection() {
        let config = config();
        assert!(config.is_token_endpoint("/oauth/token"));
        assert!(config.is_token_endpoint("oauth/token?grant_type=client_credentials"));
        assert!(!config.is_token_endpoint("/oauth/token/refresh"));
        assert!(!config.is_token_endpoint("/v1/profile"));
    }

    #[test]
    fn test_encoded_basic_credential() {
        assert_eq!(config().encoded_basic_credential(), "Y2xpZW50OnNlY3JldA==");
    }
}
