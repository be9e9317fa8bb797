pub mod dto;
pub mod error;
pub mod service;

pub use dto::{ConvertedAudio, UploadedDocument};
pub use error::{ConversionError, ConversionOutcome};
pub use service::{ConversionService, ConversionServiceApi};
