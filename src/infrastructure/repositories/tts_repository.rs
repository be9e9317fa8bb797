use crate::domain::tts::{SpeedFactor, VoiceInfo};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (AWS Polly, OpenAI, espeak-ng, etc.)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single audio stream
/// - Applying the requested voice and speed per call, never on shared state
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Short provider name used in logs and health output
    fn provider(&self) -> &'static str;

    /// Voices this provider can synthesize with, in preference order
    fn voices(&self) -> &'static [VoiceInfo];

    /// Synthesize text to speech with the given voice and speed
    ///
    /// Returns the complete audio payload ready for playback
    ///
    /// # Arguments
    /// * `text` - The cleaned text to synthesize (normalized whitespace)
    /// * `voice` - A voice taken from `voices()`
    /// * `speed` - Rate multiplier, ignored by providers without rate control
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceInfo,
        speed: SpeedFactor,
    ) -> Result<Vec<u8>, String>;
}
