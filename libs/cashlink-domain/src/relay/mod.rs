//! Relay domain module
//!
//! This module turns a logical call from the client (endpoint, method, token,
//! JSON body or base64 files) into a concrete upstream HTTP request, and turns
//! the upstream answer back into the envelope the client expects.

mod entity;
mod error;
mod multipart;
mod ports;
mod service;

pub use entity::{
    AuthMode, EncodedFile, HttpMethod, NormalizedResponse, OutboundRequest, RelayCall,
    RelayPayload, RequestBody, UpstreamRequestSpec, UpstreamResponse, JSON_CONTENT_TYPE,
};
pub use error::{RelayError, Result};
pub use multipart::{BoundarySource, FilePart, MultipartForm, RandomBoundary};
pub use ports::UpstreamTransport;
pub use service::RelayService;

#[cfg(test)]
pub use multipart::MockBoundarySource;
