//! Adapters translating domain ports into reqwest and tokio calls

mod file_source;
mod otp_client;
mod upstream_client;

pub use file_source::{mime_type_for_path, TokioFileSource};
pub use otp_client::ReqwestOtpClient;
pub use upstream_client::ReqwestUpstreamClient;
