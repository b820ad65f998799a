//! Reqwest Upstream Client Implementation
//!
//! This module implements the `UpstreamTransport` trait with a reqwest client.
//! The request is sent exactly as the domain built it; every HTTP status is a
//! valid answer, only network-level failures become errors.

use cashlink_domain::relay::{
    HttpMethod, OutboundRequest, RelayError, UpstreamResponse, UpstreamTransport,
};
use reqwest::{Client, Method};
use tracing::{debug, error, instrument};

/// reqwest-based implementation of the UpstreamTransport port
///
/// ## Error Handling
///
/// Connection failures and unreadable bodies are converted to
/// `RelayError::Transport` with the target URL in the message.
///
/// No timeout is configured here: the client inherits reqwest's defaults.
#[derive(Clone, Default)]
pub struct ReqwestUpstreamClient {
    client: Client,
}

impl ReqwestUpstreamClient {
    /// Create a new upstream client
    ///
    /// # Example
    ///
    /// ```rust
    /// use cashlink_http::ReqwestUpstreamClient;
    ///
    /// let transport = ReqwestUpstreamClient::new(reqwest::Client::new());
    /// ```
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }
}

impl UpstreamTransport for ReqwestUpstreamClient {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl std::future::Future<Output = Result<UpstreamResponse, RelayError>> + Send {
        let client = self.client.clone();

        async move {
            let OutboundRequest {
                method,
                url,
                headers,
                body,
            } = request;

            debug!(url = %url, "Sending upstream request");

            let mut builder = client.request(Self::method(method), &url);
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = body {
                builder = builder.body(body);
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(err) => {
                    error!(url = %url, error = ?err, "Failed to reach upstream");
                    return Err(RelayError::transport(format!(
                        "{} {} failed: {}",
                        method, url, err
                    )));
                }
            };

            let status = response.status().as_u16();

            match response.text().await {
                Ok(body) => {
                    debug!(url = %url, status, body_size = body.len(), "Received upstream response");
                    Ok(UpstreamResponse::new(status, body))
                }
                Err(err) => {
                    error!(url = %url, status, error = ?err, "Failed to read upstream response body");
                    Err(RelayError::transport(format!(
                        "Failed to read response body from {}: {}",
                        url, err
                    )))
                }
            }
        }
    }
}
