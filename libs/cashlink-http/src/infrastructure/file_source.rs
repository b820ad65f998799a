//! Local file implementation of the `FileSource` port
//!
//! Metadata is taken from the filesystem when the file is opened; the
//! content is only read when the data URL is requested.

use cashlink_domain::intake::{to_data_url, FileDescriptor, FileSource, IntakeError};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// MIME type declared for a path, based on its extension
///
/// Unknown extensions map to `application/octet-stream`, which the intake
/// rules then reject.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// A file on local disk, read through tokio
#[derive(Debug, Clone)]
pub struct TokioFileSource {
    path: PathBuf,
    descriptor: FileDescriptor,
}

impl TokioFileSource {
    /// Open a file and capture its name, declared type and size
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::ReadFailed` if the path does not exist or is not
    /// a regular file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref().to_path_buf();

        let metadata = tokio::fs::metadata(&path).await.map_err(|err| {
            warn!(error = %err, "Cannot stat file");
            IntakeError::read_failed(format!("{}: {}", path.display(), err))
        })?;

        if !metadata.is_file() {
            return Err(IntakeError::read_failed(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let descriptor = FileDescriptor::new(filename, mime_type_for_path(&path), metadata.len());
        debug!(mime_type = %descriptor.mime_type, size = descriptor.size_bytes, "Opened file");

        Ok(Self { path, descriptor })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for TokioFileSource {
    fn descriptor(&self) -> &FileDescriptor {
        &self.descriptor
    }

    fn read_as_data_url(
        &self,
    ) -> impl std::future::Future<Output = Result<String, IntakeError>> + Send {
        let path = self.path.clone();
        let mime_type = self.descriptor.mime_type.clone();

        async move {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|err| IntakeError::read_failed(format!("{}: {}", path.display(), err)))?;
            Ok(to_data_url(&mime_type, &bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(mime_type_for_path(Path::new("a/receipt.JPG")), "image/jpeg");
        assert_eq!(mime_type_for_path(Path::new("scan.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for_path(Path::new("bill.pdf")), "application/pdf");
        assert_eq!(mime_type_for_path(Path::new("logo.png")), "image/png");
        assert_eq!(
            mime_type_for_path(Path::new("noext")),
            "application/octet-stream"
        );
    }
}
