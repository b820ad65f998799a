//! Port for the upstream HTTP transport
//!
//! The domain builds the complete request; the transport only sends it and
//! reads the answer back as text.

use std::future::Future;

use super::{
    entity::{OutboundRequest, UpstreamResponse},
    error::RelayError,
};

/// Port for sending requests to the upstream API
///
/// Implementations must:
/// - Send the method, URL, headers and body exactly as given
/// - Return any HTTP status (including 4xx/5xx) as an `UpstreamResponse`
/// - Convert network failures and unreadable bodies to `RelayError::Transport`
/// - Apply no retries and no timeout of their own
pub trait UpstreamTransport: Send + Sync {
    /// Send a request and read the response body as text
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Transport` if the upstream cannot be reached or the
    /// body cannot be read
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, RelayError>> + Send;
}
