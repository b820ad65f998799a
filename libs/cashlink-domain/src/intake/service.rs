//! Intake service - File validation and base64 preparation
//!
//! This module holds the business rules a file must satisfy before it is
//! sent anywhere, and the conversion of an accepted file into an
//! `EncodedPayload`.

use tracing::debug;

use super::{
    encoding::{decoded_size, format_file_size, strip_data_url, validate_base64},
    EncodedPayload, FileDescriptor, FileSource, IntakeError,
};

/// MIME types accepted for invoice uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "application/pdf",
];

/// Maximum size of a single file (2 MiB)
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Maximum number of files in one submission
pub const MAX_FILES_PER_SUBMISSION: usize = 3;

/// Configuration for the intake service
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Maximum allowed file size in bytes (default: 2 MiB)
    pub max_file_size: u64,
    /// Maximum number of files per submission (default: 3)
    pub max_files: usize,
    /// Accepted MIME types
    pub allowed_mime_types: &'static [&'static str],
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_files: MAX_FILES_PER_SUBMISSION,
            allowed_mime_types: ALLOWED_MIME_TYPES,
        }
    }
}

/// Validate a file against the default intake rules
///
/// See [`IntakeService::validate_file`].
pub fn validate_file(descriptor: &FileDescriptor) -> Result<(), IntakeError> {
    IntakeService::default().validate_file(descriptor)
}

/// Trimmed, lowercase form of a declared MIME type
fn normalize_mime_type(mime_type: &str) -> String {
    mime_type.trim().to_ascii_lowercase()
}

/// Service that gatekeeps and prepares user files
///
/// The service holds no state besides its configuration; every call is
/// independent.
#[derive(Debug, Clone, Default)]
pub struct IntakeService {
    config: IntakeConfig,
}

impl IntakeService {
    pub fn new(config: IntakeConfig) -> Self {
        Self { config }
    }

    /// Check a file's declared type and size
    ///
    /// The type is checked first, so a file that is both of the wrong type and
    /// too large reports the type error.
    ///
    /// # Errors
    ///
    /// - `IntakeError::UnsupportedType` if the MIME type is not allowed
    /// - `IntakeError::FileTooLarge` if the file exceeds the size ceiling
    pub fn validate_file(&self, descriptor: &FileDescriptor) -> Result<(), IntakeError> {
        let mime_type = normalize_mime_type(&descriptor.mime_type);
        if !self.config.allowed_mime_types.contains(&mime_type.as_str()) {
            return Err(IntakeError::UnsupportedType {
                mime_type: descriptor.mime_type.clone(),
                allowed: self.config.allowed_mime_types.join(", "),
            });
        }

        if descriptor.size_bytes > self.config.max_file_size {
            return Err(IntakeError::FileTooLarge {
                size: descriptor.size_bytes,
                max: self.config.max_file_size,
                max_display: format_file_size(self.config.max_file_size),
            });
        }

        Ok(())
    }

    /// Check the number of files in one submission
    pub fn validate_count(&self, count: usize) -> Result<(), IntakeError> {
        if count > self.config.max_files {
            return Err(IntakeError::TooManyFiles {
                count,
                max: self.config.max_files,
            });
        }
        Ok(())
    }

    /// Read a file and return its content as base64
    ///
    /// The data URL prefix is stripped from the read result. An empty or
    /// malformed remainder is rejected even when the read itself succeeded.
    ///
    /// # Errors
    ///
    /// - `IntakeError::ReadFailed` if the underlying read fails
    /// - `IntakeError::EmptyPayload` if nothing remains after the prefix
    /// - `IntakeError::InvalidEncoding` if the remainder is not valid base64
    pub async fn file_to_base64<S: FileSource>(&self, source: &S) -> Result<String, IntakeError> {
        let data_url = source.read_as_data_url().await?;
        let payload = strip_data_url(&data_url);

        if payload.is_empty() {
            return Err(IntakeError::EmptyPayload);
        }

        if !validate_base64(payload) {
            return Err(IntakeError::invalid_encoding(format!(
                "'{}' is not standard base64",
                source.descriptor().filename
            )));
        }

        Ok(payload.to_string())
    }

    /// Validate and encode one file
    ///
    /// # Errors
    ///
    /// Any error of [`validate_file`](Self::validate_file) or
    /// [`file_to_base64`](Self::file_to_base64), plus
    /// `IntakeError::SizeMismatch` when the payload does not decode to the
    /// declared size.
    pub async fn prepare<S: FileSource>(&self, source: &S) -> Result<EncodedPayload, IntakeError> {
        let descriptor = source.descriptor();
        self.validate_file(descriptor)?;

        let base64 = self.file_to_base64(source).await?;

        let decoded = decoded_size(&base64);
        if decoded as u64 != descriptor.size_bytes {
            return Err(IntakeError::SizeMismatch {
                decoded,
                expected: descriptor.size_bytes,
            });
        }

        debug!(
            filename = %descriptor.filename,
            size = %format_file_size(descriptor.size_bytes),
            "Prepared file payload"
        );

        Ok(EncodedPayload {
            base64,
            original_filename: descriptor.filename.clone(),
            content_type: normalize_mime_type(&descriptor.mime_type),
        })
    }

    /// Validate and encode all files of one submission, in order
    ///
    /// The file count is checked before any file is read, and every file is
    /// validated before the first read so a bad file fails fast.
    pub async fn prepare_submission<S: FileSource>(
        &self,
        sources: &[S],
    ) -> Result<Vec<EncodedPayload>, IntakeError> {
        self.validate_count(sources.len())?;

        for source in sources {
            self.validate_file(source.descriptor())?;
        }

        let mut payloads = Vec::with_capacity(sources.len());
        for source in sources {
            payloads.push(self.prepare(source).await?);
        }
        Ok(payloads)
    }

    /// Get the service configuration
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }
}
