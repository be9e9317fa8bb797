#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("failed to open document: {0}")]
    Open(String),
    #[error("failed to extract text from page {page}: {message}")]
    Page { page: u32, message: String },
    #[error("extraction task failed: {0}")]
    Task(String),
}
