//! Port for reading user-selected files
//!
//! We use native Rust async traits with `impl Future` return types instead of
//! `async_trait` to keep static dispatch.

use std::future::Future;

use super::{entity::FileDescriptor, error::IntakeError};

/// Port for a readable, user-selected file
///
/// Implementations must:
/// - Report the file's metadata without reading its content
/// - Read the whole content as a `data:<mime>;base64,<payload>` URL
/// - Convert any I/O failure to `IntakeError::ReadFailed`
pub trait FileSource: Send + Sync {
    /// Metadata reported at selection time
    fn descriptor(&self) -> &FileDescriptor;

    /// Read the whole file as a data URL
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::ReadFailed` if the underlying read fails
    fn read_as_data_url(&self) -> impl Future<Output = Result<String, IntakeError>> + Send;
}
