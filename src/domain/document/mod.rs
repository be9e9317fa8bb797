pub mod error;
pub mod extractor;
pub mod sanitize;

pub use error::ExtractionError;
pub use extractor::{ExtractedText, TextExtractor};
pub use sanitize::{artifact_base_name, is_safe_filename, sanitize_filename};
