//! File intake domain module
//!
//! This module gatekeeps user-selected files before they travel to the proxy:
//! it checks the declared type and size, turns the file into a base64 payload
//! and provides the display helpers used alongside it.

mod encoding;
mod entity;
mod error;
mod ports;
mod service;

pub use encoding::{decoded_size, format_file_size, strip_data_url, to_data_url, validate_base64};
pub use entity::{EncodedPayload, FileDescriptor, InMemoryFile};
pub use error::{IntakeError, Result};
pub use ports::FileSource;
pub use service::{
    validate_file, IntakeConfig, IntakeService, ALLOWED_MIME_TYPES, MAX_FILES_PER_SUBMISSION,
    MAX_FILE_SIZE,
};
