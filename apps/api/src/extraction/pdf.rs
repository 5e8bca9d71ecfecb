use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

/// Turns an uploaded document into plain text.
///
/// Extraction failures are not errors: implementations return an empty string
/// and the caller decides how to reject it.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, file_name: &str, bytes: Bytes) -> String;
}

/// `pdf-extract` backed extractor. Parsing is CPU-bound and runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, file_name: &str, bytes: Bytes) -> String {
        let size = bytes.len();
        // The parser can panic on malformed files; a panic surfaces here as a JoinError.
        let result =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

        match result {
            Ok(Ok(text)) => {
                debug!("Extracted {} chars from {file_name} ({size} bytes)", text.len());
                text
            }
            Ok(Err(e)) => {
                warn!("PDF extraction failed for {file_name}: {e}");
                String::new()
            }
            Err(e) => {
                warn!("PDF extraction aborted for {file_name}: {e}");
                String::new()
            }
        }
    }
}
