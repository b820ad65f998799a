//! Cashlink Proxy - Stateless Relay Service
//!
//! HTTP service standing between the Cashlink clients and the third-party
//! cashback API. It relays JSON and multipart calls with the fixed upstream
//! credentials, and looks up one-time-passwords from the admin OTP endpoint.

pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;

use cashlink_domain::{OtpService, RelayService};
use cashlink_http::{ReqwestOtpClient, ReqwestUpstreamClient};
use std::sync::Arc;

use crate::config::ProxyConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub relay_service: Arc<RelayService<ReqwestUpstreamClient>>,
    pub otp_service: Arc<OtpService<ReqwestOtpClient>>,
}

impl AppState {
    /// Wire the services from configuration
    ///
    /// One reqwest client is shared by both adapters; it carries no timeout.
    pub fn from_config(config: &ProxyConfig) -> Self {
        let http = reqwest::Client::new();

        let relay = RelayService::new(
            ReqwestUpstreamClient::new(http.clone()),
            config.upstream.clone(),
        );
        let otp = OtpService::new(ReqwestOtpClient::new(
            http,
            config.otp_url.clone(),
            config.otp_admin_token.clone(),
        ));

        Self {
            relay_service: Arc::new(relay),
            otp_service: Arc::new(otp),
        }
    }
}
