use super::error::TtsServiceError;
use super::speed::SpeedFactor;
use super::voice::{resolve_voice, VoiceInfo, VoicePreferences, VoiceSelector};
use crate::infrastructure::repositories::TtsRepository;
use crate::infrastructure::storage::AudioStore;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    pub filename: String,
    pub voice_id: &'static str,
    pub char_count: usize,
    pub audio_size_bytes: usize,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    audio_store: Arc<AudioStore>,
    preferences: VoicePreferences,
    timeout: Duration,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        audio_store: Arc<AudioStore>,
        preferences: VoicePreferences,
        timeout: Duration,
    ) -> Self {
        Self {
            tts_repo,
            audio_store,
            preferences,
            timeout,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text and store the audio as `filename` in the audio store
    ///
    /// This operation:
    /// - Resolves the backend voice for the selector (never fails on gender)
    /// - Runs the backend to completion, bounded by the configured timeout
    /// - Writes the artifact atomically, so failures leave no file behind
    async fn synthesize_to(
        &self,
        text: &str,
        voice: VoiceSelector,
        speed: SpeedFactor,
        filename: &str,
    ) -> Result<TtsSynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize_to(
        &self,
        text: &str,
        voice: VoiceSelector,
        speed: SpeedFactor,
        filename: &str,
    ) -> Result<TtsSynthesisResult, TtsServiceError> {
        let cleaned_text = self.clean_text(text);
        if cleaned_text.is_empty() {
            return Err(TtsServiceError::Invalid("Text cannot be empty".to_string()));
        }

        let voice_info = self.resolve_voice(voice)?;

        tracing::info!(
            provider = self.tts_repo.provider(),
            selector = %voice,
            voice = voice_info.id,
            speed = speed.value(),
            original_length = text.len(),
            cleaned_length = cleaned_text.len(),
            filename = filename,
            "TTS synthesis request"
        );

        let audio_data = tokio::time::timeout(
            self.timeout,
            self.tts_repo.synthesize(&cleaned_text, &voice_info, speed),
        )
        .await
        .map_err(|_| TtsServiceError::Timeout(self.timeout.as_secs()))?
        .map_err(TtsServiceError::Dependency)?;

        if audio_data.is_empty() {
            return Err(TtsServiceError::Dependency(
                "Synthesis backend returned no audio".to_string(),
            ));
        }

        self.audio_store
            .save(filename, &audio_data)
            .await
            .map_err(|e| TtsServiceError::Storage(e.to_string()))?;

        Ok(TtsSynthesisResult {
            filename: filename.to_string(),
            voice_id: voice_info.id,
            char_count: cleaned_text.chars().count(),
            audio_size_bytes: audio_data.len(),
        })
    }
}

impl TtsService {
    fn resolve_voice(&self, selector: VoiceSelector) -> Result<VoiceInfo, TtsServiceError> {
        resolve_voice(
            self.tts_repo.voices(),
            selector,
            self.preferences.for_selector(selector),
        )
        .copied()
        .ok_or_else(|| {
            TtsServiceError::Dependency(format!(
                "Backend '{}' offers no voices",
                self.tts_repo.provider()
            ))
        })
    }

    /// Collapse the line breaks and spacing left over from page layout
    fn clean_text(&self, text: &str) -> String {
        WHITESPACE.replace_all(text, " ").trim().to_string()
    }
}
