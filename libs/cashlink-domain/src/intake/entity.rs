//! Domain entities for file intake
//!
//! A `FileDescriptor` describes a file as the user selected it. An
//! `EncodedPayload` is what travels to the proxy once the file passed
//! validation and was converted to base64.

use serde::{Deserialize, Serialize};
use std::future::Future;

use super::{encoding::to_data_url, error::IntakeError, ports::FileSource};

/// Metadata of a user-selected file
///
/// `size_bytes` is the size reported by the source at selection time, before
/// any content is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Name of the file as selected by the user
    pub filename: String,
    /// Declared MIME type (e.g. "image/png")
    pub mime_type: String,
    /// Declared size in bytes
    pub size_bytes: u64,
}

impl FileDescriptor {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// A file whose content is already held in memory
///
/// # Example
///
/// ```rust
/// use cashlink_domain::intake::InMemoryFile;
///
/// let file = InMemoryFile::from_bytes("invoice.pdf", "application/pdf", b"%PDF-1.7".to_vec());
/// assert_eq!(file.descriptor().size_bytes, 8);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    descriptor: FileDescriptor,
    raw_bytes: Vec<u8>,
}

impl InMemoryFile {
    /// Create a file from an explicit descriptor and its content
    ///
    /// The descriptor's size is kept as given, so a descriptor may disagree
    /// with the content (as a truncated upload would).
    pub fn new(descriptor: FileDescriptor, raw_bytes: Vec<u8>) -> Self {
        Self {
            descriptor,
            raw_bytes,
        }
    }

    /// Create a file whose declared size is the length of its content
    pub fn from_bytes(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        raw_bytes: Vec<u8>,
    ) -> Self {
        let descriptor = FileDescriptor::new(filename, mime_type, raw_bytes.len() as u64);
        Self::new(descriptor, raw_bytes)
    }

    pub fn descriptor(&self) -> &FileDescriptor {
        &self.descriptor
    }

    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw_bytes
    }
}

impl FileSource for InMemoryFile {
    fn descriptor(&self) -> &FileDescriptor {
        &self.descriptor
    }

    fn read_as_data_url(&self) -> impl Future<Output = Result<String, IntakeError>> + Send {
        let url = to_data_url(&self.descriptor.mime_type, &self.raw_bytes);
        async move { Ok(url) }
    }
}

/// A validated file converted to base64, ready to be sent to the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPayload {
    /// Standard base64 of the file content, without any data URL prefix
    pub base64: String,
    /// Name of the file as selected by the user
    pub original_filename: String,
    /// MIME type the upload is declared with
    pub content_type: String,
}

impl EncodedPayload {
    /// Number of bytes the payload decodes to
    pub fn decoded_size(&self) -> usize {
        super::encoding::decoded_size(&self.base64)
    }
}
