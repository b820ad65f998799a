//! DTOs for the proxy endpoint
//!
//! The wire shape keeps the client's field names; conversion into a
//! `RelayCall` makes the body variant explicit.

use cashlink_domain::relay::{EncodedFile, HttpMethod, RelayCall, RelayError, RelayPayload};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Request body for the proxy endpoint
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    /// Upstream endpoint path
    #[schema(example = "/v1/invoices")]
    pub endpoint: String,
    /// HTTP method, "GET" when omitted
    #[schema(example = "POST")]
    #[serde(default)]
    pub method: Option<String>,
    /// JSON body forwarded as-is
    #[schema(value_type = Option<Object>)]
    #[serde(default)]
    pub body: Option<Value>,
    /// Access token of the signed-in user
    #[serde(default)]
    pub user_access_token: Option<String>,
    /// Send `formFields` and `files` as multipart/form-data
    #[serde(default)]
    pub is_multipart: bool,
    /// Text fields of a multipart request, in order
    #[schema(value_type = Option<Object>)]
    #[serde(default)]
    pub form_fields: Option<Map<String, Value>>,
    /// Files of a multipart request
    #[serde(default)]
    pub files: Option<Vec<ProxyFile>>,
}

/// A base64-encoded file of a multipart request
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProxyFile {
    /// Form field name
    #[schema(example = "invoice")]
    pub name: String,
    /// Standard base64 of the file content
    #[schema(example = "iVBORw0KGgo=")]
    pub data: String,
    #[schema(example = "receipt.png")]
    pub filename: String,
    #[schema(example = "image/png")]
    pub content_type: String,
}

impl From<ProxyFile> for EncodedFile {
    fn from(file: ProxyFile) -> Self {
        Self {
            field_name: file.name,
            data: file.data,
            filename: file.filename,
            content_type: file.content_type,
        }
    }
}

impl TryFrom<ProxyRequest> for RelayCall {
    type Error = RelayError;

    fn try_from(request: ProxyRequest) -> Result<Self, Self::Error> {
        let method = match request.method.as_deref() {
            Some(method) if !method.trim().is_empty() => method.parse::<HttpMethod>()?,
            _ => HttpMethod::default(),
        };

        let fields = request.form_fields.unwrap_or_default();
        let files = request.files.unwrap_or_default();

        let has_body = !matches!(request.body, None | Some(Value::Null));

        let payload = if request.is_multipart {
            if has_body {
                return Err(RelayError::invalid_request(
                    "body cannot be combined with isMultipart",
                ));
            }
            RelayPayload::Multipart {
                fields: fields
                    .into_iter()
                    .map(|(name, value)| (name, field_text(value)))
                    .collect(),
                files: files.into_iter().map(EncodedFile::from).collect(),
            }
        } else if !files.is_empty() || !fields.is_empty() {
            return Err(RelayError::invalid_request(
                "formFields and files require isMultipart to be true",
            ));
        } else {
            match request.body {
                None | Some(Value::Null) => RelayPayload::None,
                Some(body) => RelayPayload::Json(body),
            }
        };

        Ok(RelayCall {
            endpoint: request.endpoint,
            method,
            user_access_token: request.user_access_token,
            payload,
        })
    }
}

/// Text of a form field: strings as-is, anything else as its JSON text
fn field_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Body returned with status 500 when the proxy itself fails
#[derive(Debug, Serialize, ToSchema)]
pub struct ProxyErrorResponse {
    #[schema(example = "Upstream request failed: connection refused")]
    pub error: String,
    /// Diagnostic detail of the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Body returned with status 200 when the upstream rejected the call
#[derive(Debug, Serialize, ToSchema)]
pub struct UpstreamErrorEnvelope {
    /// Always true
    pub error: bool,
    /// Upstream HTTP status
    #[schema(example = 401)]
    pub status: u16,
    /// Upstream body, or `{"raw": <text>}` when it was not JSON
    #[schema(value_type = Object)]
    pub data: Value,
}
