//! OTP routes

use axum::{routing::post, Router};

use crate::{handlers::otp::otp_handler, AppState};

/// Create OTP routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/otp", post(otp_handler))
}
