use super::error::ExtractionError;
use async_trait::async_trait;
use std::path::Path;

/// Text of a whole document, pages concatenated in page order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for documents with no readable text (blank or scanned pages)
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Extracts plain text from a stored document.
///
/// Implementations must never panic on malformed input: every parse or I/O
/// problem is reported as an `ExtractionError`. Deciding whether blank text
/// is acceptable is left to the caller.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError>;
}
