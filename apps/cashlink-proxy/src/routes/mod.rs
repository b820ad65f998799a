//! API routes

pub mod otp;
pub mod proxy;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::{
        otp::{OtpErrorResponse, OtpRequest},
        proxy::{ProxyErrorResponse, ProxyFile, ProxyRequest, UpstreamErrorEnvelope},
    },
    handlers, AppState,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::proxy::proxy_handler,
        handlers::otp::otp_handler,
        health_handler
    ),
    components(
        schemas(
            ProxyRequest,
            ProxyFile,
            ProxyErrorResponse,
            UpstreamErrorEnvelope,
            OtpRequest,
            OtpErrorResponse
        )
    ),
    tags(
        (name = "proxy", description = "Relay to the cashback API"),
        (name = "otp", description = "One-time-password lookup"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "Cashlink Proxy API",
        version = "0.1.0",
        description = "Stateless relay between the Cashlink clients and the cashback API",
        contact(
            name = "Cashlink Team"
        )
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(proxy::routes())
        .merge(otp::routes())
        .route("/health", axum::routing::get(health_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
async fn health_handler() -> &'static str {
    "OK"
}
