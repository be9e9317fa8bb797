use crate::domain::document::{ExtractedText, ExtractionError, TextExtractor};
use async_trait::async_trait;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Pure Rust PDF text extraction backed by `lopdf`
#[derive(Debug, Clone, Default)]
pub struct LopdfTextExtractor;

impl LopdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Blocking extraction: pages in page-number order, texts concatenated
    fn extract_blocking(path: &Path) -> Result<ExtractedText, ExtractionError> {
        let document = Document::load(path).map_err(|e| ExtractionError::Open(e.to_string()))?;

        let mut text = String::new();
        // get_pages is keyed by page number, so iteration is already in order
        for page_number in document.get_pages().keys() {
            let page_text = document
                .extract_text(&[*page_number])
                .map_err(|e| ExtractionError::Page {
                    page: *page_number,
                    message: e.to_string(),
                })?;
            text.push_str(&page_text);
        }

        Ok(ExtractedText::new(text))
    }
}

#[async_trait]
impl TextExtractor for LopdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        let start_time = std::time::Instant::now();
        let owned: PathBuf = path.to_path_buf();

        // lopdf parsing is CPU bound and synchronous
        let result = tokio::task::spawn_blocking(move || Self::extract_blocking(&owned))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?;

        match &result {
            Ok(text) => tracing::info!(
                path = %path.display(),
                text_length = text.as_str().len(),
                latency_ms = start_time.elapsed().as_millis(),
                "PDF text extracted"
            ),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "PDF text extraction failed"
            ),
        }

        result
    }
}
