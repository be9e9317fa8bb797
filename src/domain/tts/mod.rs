pub mod error;
pub mod service;
pub mod speed;
pub mod voice;

pub use error::TtsServiceError;
pub use service::{TtsService, TtsServiceApi, TtsSynthesisResult};
pub use speed::SpeedFactor;
pub use voice::{resolve_voice, VoiceInfo, VoicePreferences, VoiceSelector};
