//! Domain entities for relaying calls upstream
//!
//! A `RelayCall` is what the client asks for. An `UpstreamRequestSpec` is the
//! resolved request (auth chosen, files decoded). An `OutboundRequest` is its
//! wire form, handed to the transport port. A `NormalizedResponse` is what
//! comes back.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use super::{error::RelayError, multipart::MultipartForm};
use crate::intake::EncodedPayload;

/// Media type of JSON request bodies
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP method of an upstream call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            other => Err(RelayError::invalid_request(format!(
                "Unsupported HTTP method '{}'",
                other
            ))),
        }
    }
}

/// Authorization applied to an upstream request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Base64-encoded `client:secret`
    Basic(String),
    /// Caller-supplied access token
    Bearer(String),
    None,
}

impl AuthMode {
    /// Value of the `Authorization` header, if any
    pub fn header_value(&self) -> Option<String> {
        match self {
            AuthMode::Basic(credential) => Some(format!("Basic {}", credential)),
            AuthMode::Bearer(token) => Some(format!("Bearer {}", token)),
            AuthMode::None => None,
        }
    }
}

/// A file as the client sends it: base64 content plus its part metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedFile {
    /// Form field name of the part (e.g. "invoice")
    pub field_name: String,
    /// Standard base64 of the content
    pub data: String,
    pub filename: String,
    pub content_type: String,
}

impl EncodedFile {
    /// Attach a prepared intake payload under `field_name`
    pub fn from_payload(field_name: impl Into<String>, payload: EncodedPayload) -> Self {
        Self {
            field_name: field_name.into(),
            data: payload.base64,
            filename: payload.original_filename,
            content_type: payload.content_type,
        }
    }
}

/// Body of a client call, selected explicitly by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum RelayPayload {
    None,
    Json(Value),
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<EncodedFile>,
    },
}

impl RelayPayload {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RelayPayload::Multipart { .. })
    }
}

/// A logical call from the client
#[derive(Debug, Clone, PartialEq)]
pub struct RelayCall {
    /// Endpoint path relative to the upstream base URL
    pub endpoint: String,
    pub method: HttpMethod,
    /// Access token of the signed-in user, if any
    pub user_access_token: Option<String>,
    pub payload: RelayPayload,
}

impl RelayCall {
    pub fn new(endpoint: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            user_access_token: None,
            payload: RelayPayload::None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.user_access_token = Some(token.into());
        self
    }

    pub fn with_payload(mut self, payload: RelayPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Whether a non-empty access token was supplied
    pub fn has_token(&self) -> bool {
        self.user_access_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}

/// Body of a resolved upstream request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// A fully resolved upstream request
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequestSpec {
    pub endpoint: String,
    pub method: HttpMethod,
    pub auth: AuthMode,
    pub body: RequestBody,
}

/// Wire form of an upstream request, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    /// First header value with the given name, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw upstream answer: status and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Upstream answer with its body parsed
///
/// The payload is the parsed JSON body, or `{"raw": <text>}` when the body is
/// not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub ok: bool,
    pub http_status: u16,
    pub payload: Value,
}

impl NormalizedResponse {
    pub fn from_upstream(response: UpstreamResponse) -> Self {
        let payload = serde_json::from_str::<Value>(&response.body)
            .unwrap_or_else(|_| json!({ "raw": response.body }));

        Self {
            ok: (200..300).contains(&response.status),
            http_status: response.status,
            payload,
        }
    }

    /// Body returned to the client with a 200 transport status
    ///
    /// Success returns the upstream payload untouched. Failure wraps it as
    /// `{"error": true, "status": <upstream status>, "data": <payload>}`.
    pub fn into_envelope(self) -> Value {
        if self.ok {
            self.payload
        } else {
            json!({
                "error": true,
                "status": self.http_status,
                "data": self.payload,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_parsing() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!(" Post ".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!("head".parse::<HttpMethod>().unwrap(), HttpMethod::Head);
        assert_eq!("OPTIONS".parse::<HttpMethod>().unwrap(), HttpMethod::Options);
        assert!("TRACE".parse::<HttpMethod>().is_err());
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn test_auth_header_values() {
        assert_eq!(
            AuthMode::Basic("Y2xpZW50OnNlY3JldA==".into()).header_value(),
            Some("Basic Y2xpZW50OnNlY3JldA==".to_string())
        );
        assert_eq!(
            AuthMode::Bearer("tok".into()).header_value(),
            Some("Bearer tok".to_string())
        );
        assert_eq!(AuthMode::None.header_value(), None);
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let call = RelayCall::new("/v1/me", HttpMethod::Get).with_token("  ");
        assert!(!call.has_token());
    }

    #[test]
    fn test_normalize_success_returns_payload() {
        let response = UpstreamResponse::new(200, r#"{"balance": 12.5}"#);
        let normalized = NormalizedResponse::from_upstream(response);

        assert!(normalized.ok);
        assert_eq!(normalized.into_envelope(), json!({ "balance": 12.5 }));
    }

    #[test]
    fn test_normalize_failure_wraps_in_envelope() {
        let response = UpstreamResponse::new(401, r#"{"message": "Unauthorized"}"#);
        let normalized = NormalizedResponse::from_upstream(response);

        assert!(!normalized.ok);
        assert_eq!(
            normalized.into_envelope(),
            json!({
                "error": true,
                "status": 401,
                "data": { "message": "Unauthorized" }
            })
        );
    }

    #[test]
    fn test_normalize_non_json_body_is_wrapped_as_raw() {
        let response = UpstreamResponse::new(502, "<html>Bad Gateway</html>");
        let normalized = NormalizedResponse::from_upstream(response);

        assert_eq!(
            normalized.payload,
            json!({ "raw": "<html>Bad Gateway</html>" })
        );
    }

    #[test]
    fn test_encoded_file_from_payload() {
        let payload = EncodedPayload {
            base64: "AQID".to_string(),
            original_filename: "bill.pdf".to_string(),
            content_type: "application/pdf".to_string(),
        };

        let file = EncodedFile::from_payload("invoice", payload);

        assert_eq!(file.field_name, "invoice");
        assert_eq!(file.data, "AQID");
        assert_eq!(file.filename, "bill.pdf");
    }
}
