//! Relay service - Upstream request orchestration
//!
//! The service resolves authorization, decodes file payloads into a
//! multipart body, hands the request to the transport port and normalizes
//! the answer. Each call is independent; the service only holds immutable
//! configuration.

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{debug, error, info, warn};

use super::{
    AuthMode, BoundarySource, FilePart, MultipartForm, NormalizedResponse, OutboundRequest,
    RandomBoundary, RelayCall, RelayError, RelayPayload, RequestBody, UpstreamRequestSpec,
    UpstreamTransport, JSON_CONTENT_TYPE,
};
use crate::config::UpstreamConfig;

/// Service relaying client calls to the upstream cashback API
///
/// ## Static Dispatch
///
/// The service is generic over the `UpstreamTransport` and the
/// `BoundarySource`; the compiler generates a specialized version for each
/// concrete pair.
pub struct RelayService<T, B = RandomBoundary> {
    transport: T,
    config: UpstreamConfig,
    boundaries: B,
}

impl<T> RelayService<T>
where
    T: UpstreamTransport,
{
    /// Create a new RelayService with random multipart boundaries
    pub fn new(transport: T, config: UpstreamConfig) -> Self {
        Self::with_boundary_source(transport, config, RandomBoundary)
    }
}

impl<T, B> RelayService<T, B>
where
    T: UpstreamTransport,
    B: BoundarySource,
{
    /// Create a new RelayService with a custom boundary source
    pub fn with_boundary_source(transport: T, config: UpstreamConfig, boundaries: B) -> Self {
        Self {
            transport,
            config,
            boundaries,
        }
    }

    /// Choose the authorization for a call
    ///
    /// 1. The token-issuance endpoint always uses the configured Basic credential
    /// 2. Otherwise a caller token is sent as a Bearer token
    /// 3. Otherwise no Authorization header is sent; the upstream will most
    ///    likely reject the call, which is logged here
    pub fn resolve_auth(&self, call: &RelayCall) -> AuthMode {
        if self.config.is_token_endpoint(&call.endpoint) {
            return AuthMode::Basic(self.config.encoded_basic_credential());
        }

        match call.user_access_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => AuthMode::Bearer(token.to_string()),
            _ => {
                warn!(
                    endpoint = %call.endpoint,
                    method = %call.method,
                    "No access token supplied, upstream is likely to reject the request"
                );
                AuthMode::None
            }
        }
    }

    /// Resolve a client call into an upstream request
    ///
    /// # Errors
    ///
    /// - `RelayError::InvalidRequest` if the endpoint is empty or absolute
    /// - `RelayError::InvalidRequest` if a file content type contains CR or LF
    /// - `RelayError::InvalidBase64` if a file payload does not decode
    pub fn build_spec(&self, call: RelayCall) -> Result<UpstreamRequestSpec, RelayError> {
        validate_endpoint(&call.endpoint)?;

        let auth = self.resolve_auth(&call);

        let body = match call.payload {
            RelayPayload::None => RequestBody::Empty,
            RelayPayload::Json(value) => RequestBody::Json(value),
            RelayPayload::Multipart { fields, files } => {
                let mut form = MultipartForm::with_source(&self.boundaries);
                for (name, value) in fields {
                    form.add_field(name, value);
                }
                for file in files {
                    if file.content_type.contains(['\r', '\n']) {
                        return Err(RelayError::invalid_request(format!(
                            "Content type of file '{}' contains a line break",
                            file.filename
                        )));
                    }
                    let data = STANDARD
                        .decode(file.data.as_bytes())
                        .map_err(|e| RelayError::invalid_base64(&file.filename, e.to_string()))?;
                    form.add_file(FilePart {
                        field_name: file.field_name,
                        filename: file.filename,
                        content_type: file.content_type,
                        data,
                    });
                }
                RequestBody::Multipart(form)
            }
        };

        Ok(UpstreamRequestSpec {
            endpoint: call.endpoint,
            method: call.method,
            auth,
            body,
        })
    }

    /// Turn a resolved request into its wire form
    ///
    /// Every request carries the API key and app version headers. The content
    /// type is the multipart boundary for file uploads, JSON for JSON bodies,
    /// and absent when there is no body.
    pub fn to_outbound(&self, spec: UpstreamRequestSpec) -> Result<OutboundRequest, RelayError> {
        let mut headers = vec![
            (self.config.api_key_header.clone(), self.config.api_key.clone()),
            (
                self.config.app_version_header.clone(),
                self.config.app_version.clone(),
            ),
        ];

        if let Some(value) = spec.auth.header_value() {
            headers.push(("Authorization".to_string(), value));
        }

        let body = match spec.body {
            RequestBody::Empty => None,
            RequestBody::Json(value) => {
                headers.push(("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()));
                Some(serde_json::to_vec(&value).map_err(|e| RelayError::encoding(e.to_string()))?)
            }
            RequestBody::Multipart(form) => {
                headers.push(("Content-Type".to_string(), form.content_type()));
                Some(form.encode())
            }
        };

        Ok(OutboundRequest {
            method: spec.method,
            url: self.config.url_for(&spec.endpoint),
            headers,
            body,
        })
    }

    /// Relay a client call upstream and normalize the answer
    ///
    /// An upstream non-2xx status is a successful relay: it comes back as a
    /// `NormalizedResponse` with `ok == false`. Only proxy-side failures are
    /// errors, and they are logged with the call context before returning.
    pub async fn relay(&self, call: RelayCall) -> Result<NormalizedResponse, RelayError> {
        let endpoint = call.endpoint.clone();
        let method = call.method;
        let has_token = call.has_token();
        let is_multipart = call.payload.is_multipart();

        let result = self.forward(call).await;

        match &result {
            Ok(response) if response.ok => {
                info!(endpoint = %endpoint, method = %method, status = response.http_status, "Upstream call succeeded");
            }
            Ok(response) => {
                warn!(endpoint = %endpoint, method = %method, status = response.http_status, "Upstream rejected the call");
            }
            Err(err) => {
                error!(
                    endpoint = %endpoint,
                    method = %method,
                    has_token,
                    is_multipart,
                    error = %err,
                    "Relay failed"
                );
            }
        }

        result
    }

    async fn forward(&self, call: RelayCall) -> Result<NormalizedResponse, RelayError> {
        let spec = self.build_spec(call)?;
        let request = self.to_outbound(spec)?;

        debug!(
            url = %request.url,
            method = %request.method,
            body_size = request.body.as_ref().map_or(0, Vec::len),
            "Forwarding request upstream"
        );

        let response = self.transport.send(request).await?;
        Ok(NormalizedResponse::from_upstream(response))
    }

    /// Get the upstream configuration
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }
}

/// Endpoints are paths relative to the upstream base URL
fn validate_endpoint(endpoint: &str) -> Result<(), RelayError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(RelayError::invalid_request("Endpoint is required"));
    }
    if endpoint.contains("://") || endpoint.starts_with("//") {
        return Err(RelayError::invalid_request(format!(
            "Endpoint '{}' must be a path relative to the upstream API",
            endpoint
        )));
    }
    Ok(())
}
