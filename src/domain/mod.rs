pub mod conversion;
pub mod document;
pub mod tts;
