//! Proxy handler

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cashlink_domain::relay::{RelayCall, RelayError};
use tracing::{error, info};

use crate::{
    dto::proxy::{ProxyErrorResponse, ProxyRequest},
    AppState,
};

/// Relay a request to the cashback API
///
/// Upstream rejections are returned with status 200 and an error envelope;
/// only failures of the proxy itself use status 500.
#[utoipa::path(
    post,
    path = "/api/proxy",
    request_body = ProxyRequest,
    responses(
        (status = 200, description = "Upstream body on success, or an error envelope when the upstream rejected the call", body = UpstreamErrorEnvelope),
        (status = 500, description = "Malformed request or upstream unreachable", body = ProxyErrorResponse)
    ),
    tag = "proxy"
)]
pub async fn proxy_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ProxyRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            let err = RelayError::invalid_request(format!("Malformed request body: {}", err));
            error!(error = %err, body_size = body.len(), "Rejected proxy request");
            return internal_error(&err);
        }
    };

    let endpoint = request.endpoint.clone();
    let files = request.files.as_ref().map_or(0, Vec::len);

    let call = match RelayCall::try_from(request) {
        Ok(call) => call,
        Err(err) => {
            error!(endpoint = %endpoint, error = %err, "Rejected proxy request");
            return internal_error(&err);
        }
    };

    info!(
        endpoint = %call.endpoint,
        method = %call.method,
        has_token = call.has_token(),
        is_multipart = call.payload.is_multipart(),
        files,
        "Received proxy request"
    );

    match state.relay_service.relay(call).await {
        Ok(response) => (StatusCode::OK, Json(response.into_envelope())).into_response(),
        Err(err) => internal_error(&err),
    }
}

fn internal_error(err: &RelayError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ProxyErrorResponse {
            error: err.to_string(),
            stack: Some(format!("{:?}", err)),
        }),
    )
        .into_response()
}
