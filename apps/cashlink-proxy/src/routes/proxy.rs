//! Proxy routes

use axum::{routing::post, Router};

use crate::{handlers::proxy::proxy_handler, AppState};

/// Create proxy routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/proxy", post(proxy_handler))
}
