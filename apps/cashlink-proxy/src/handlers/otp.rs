//! OTP handler

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cashlink_domain::otp::OtpError;
use tracing::error;

use crate::{
    dto::otp::{OtpErrorResponse, OtpRequest},
    AppState,
};

/// Fetch the current OTP of a mobile number
#[utoipa::path(
    post,
    path = "/api/otp",
    request_body = OtpRequest,
    responses(
        (status = 200, description = "OTP service answer, relayed verbatim"),
        (status = 400, description = "Mobile number is not exactly ten digits", body = OtpErrorResponse),
        (status = 500, description = "OTP service unreachable", body = OtpErrorResponse)
    ),
    tag = "otp"
)]
pub async fn otp_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let mobile = serde_json::from_slice::<OtpRequest>(&body)
        .ok()
        .and_then(|request| request.mobile);

    let Some(mobile) = mobile else {
        return otp_error(StatusCode::BAD_REQUEST, OtpError::InvalidMobile.to_string());
    };

    match state.otp_service.fetch(&mobile).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => {
            let (status, message) = match err {
                OtpError::InvalidMobile => {
                    (StatusCode::BAD_REQUEST, OtpError::InvalidMobile.to_string())
                }
                OtpError::Upstream { status, message } => (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    message,
                ),
                OtpError::Transport(message) => {
                    error!(error = %message, "OTP lookup failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, message)
                }
            };
            otp_error(status, message)
        }
    }
}

fn otp_error(status: StatusCode, message: String) -> Response {
    (status, Json(OtpErrorResponse::new(message))).into_response()
}
