//! `multipart/form-data` body construction
//!
//! Parts are written fields first, then files, each in the order they were
//! added. File content is copied byte for byte; nothing is transcoded.

use chrono::Utc;
use uuid::Uuid;

/// Source of multipart boundaries
#[cfg_attr(test, mockall::automock)]
pub trait BoundarySource: Send + Sync {
    /// Produce a fresh boundary token
    fn next_boundary(&self) -> String;
}

/// Boundary made of the current time in milliseconds and a random UUID
///
/// Collisions with payload bytes are accepted as practically impossible; the
/// payload is not scanned.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBoundary;

impl BoundarySource for RandomBoundary {
    fn next_boundary(&self) -> String {
        format!(
            "----CashlinkFormBoundary{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        )
    }
}

/// A file attached to a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field_name: String,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// An ordered set of text fields and files sharing one boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    boundary: String,
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            fields: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Create an empty form with a boundary from `source`
    pub fn with_source<B: BoundarySource + ?Sized>(source: &B) -> Self {
        Self::new(source.next_boundary())
    }

    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn add_file(&mut self, file: FilePart) {
        self.files.push(file);
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    /// Value of the `Content-Type` header for this body
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Serialize the form into a complete request body
    pub fn encode(&self) -> Vec<u8> {
        let file_bytes: usize = self.files.iter().map(|f| f.data.len() + 256).sum();
        let mut body = Vec::with_capacity(file_bytes + self.fields.len() * 128 + 64);

        for (name, value) in &self.fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    self.boundary,
                    escape_quoted(name)
                )
                .as_bytes(),
            );
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }

        for file in &self.files {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    self.boundary,
                    escape_quoted(&file.field_name),
                    escape_quoted(&file.filename),
                    escape_line_breaks(&file.content_type)
                )
                .as_bytes(),
            );
            body.extend_from_slice(&file.data);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        body
    }
}

/// Percent-escape the characters that would break a quoted header parameter
fn escape_quoted(value: &str) -> String {
    escape_line_breaks(&value.replace('"', "%22"))
}

/// Percent-escape CR and LF so a value stays on its header line
fn escape_line_breaks(value: &str) -> String {
    value.replace('\r', "%0D").replace('\n', "%0A")
}
