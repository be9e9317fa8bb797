use super::dto::ConvertedAudio;
use crate::error::AppError;

pub const EMPTY_OR_UNREADABLE_MESSAGE: &str =
    "Empty or unreadable PDF. Scanned images cannot be read as text.";
pub const SYNTHESIS_FAILURE_MESSAGE: &str = "Could not convert text to audio.";

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("{0}")]
    Validation(String),
    #[error("empty or unreadable document")]
    EmptyOrUnreadable,
    #[error("synthesis failed: {0}")]
    SynthesisFailure(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result of one conversion request
pub type ConversionOutcome = Result<ConvertedAudio, ConversionError>;

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::Validation(msg) => AppError::BadRequest(msg),
            ConversionError::EmptyOrUnreadable => {
                AppError::BadRequest(EMPTY_OR_UNREADABLE_MESSAGE.to_string())
            }
            // Backend details are logged by the service, not sent to clients
            ConversionError::SynthesisFailure(_) => {
                AppError::ExternalService(SYNTHESIS_FAILURE_MESSAGE.to_string())
            }
            ConversionError::Storage(msg) => AppError::Internal(msg),
        }
    }
}
