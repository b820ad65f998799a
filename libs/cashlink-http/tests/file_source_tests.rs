//! Integration tests for reading local files through the intake pipeline

use base64::{engine::general_purpose::STANDARD, Engine};
use cashlink_domain::intake::{FileSource, IntakeError, IntakeService};
use cashlink_http::TokioFileSource;
use std::io::Write;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write temp file");
    path
}

#[tokio::test]
async fn open_captures_descriptor() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "receipt.PNG", &[0x89, b'P', b'N', b'G']);

    let source = TokioFileSource::open(&path).await.unwrap();

    assert_eq!(source.descriptor().filename, "receipt.PNG");
    assert_eq!(source.descriptor().mime_type, "image/png");
    assert_eq!(source.descriptor().size_bytes, 4);
}

#[tokio::test]
async fn prepare_reads_binary_content_exactly() {
    let dir = TempDir::new().unwrap();
    let content: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let path = write_file(&dir, "scan.pdf", &content);

    let source = TokioFileSource::open(&path).await.unwrap();
    let payload = IntakeService::default().prepare(&source).await.unwrap();

    assert_eq!(payload.content_type, "application/pdf");
    assert_eq!(STANDARD.decode(&payload.base64).unwrap(), content);
}

#[tokio::test]
async fn empty_file_is_rejected_as_empty_payload() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.jpg", &[]);

    let source = TokioFileSource::open(&path).await.unwrap();
    let err = IntakeService::default().prepare(&source).await.unwrap_err();

    assert_eq!(err, IntakeError::EmptyPayload);
}

#[tokio::test]
async fn missing_file_fails_to_open() {
    let dir = TempDir::new().unwrap();

    let err = TokioFileSource::open(dir.path().join("nope.png"))
        .await
        .unwrap_err();

    assert!(matches!(err, IntakeError::ReadFailed(_)));
}

#[tokio::test]
async fn file_removed_after_open_fails_to_read() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "gone.gif", b"GIF89a");
    let source = TokioFileSource::open(&path).await.unwrap();

    std::fs::remove_file(&path).unwrap();
    let err = source.read_as_data_url().await.unwrap_err();

    assert!(matches!(err, IntakeError::ReadFailed(_)));
}
