//! # Cashlink HTTP Adapters
//!
//! Infrastructure implementations of the domain ports:
//!
//! - [`ReqwestUpstreamClient`] implements `UpstreamTransport` for the cashback API
//! - [`ReqwestOtpClient`] implements `OtpProvider` for the admin OTP endpoint
//! - [`TokioFileSource`] implements `FileSource` for files on local disk

pub mod infrastructure;

pub use infrastructure::{ReqwestOtpClient, ReqwestUpstreamClient, TokioFileSource};
