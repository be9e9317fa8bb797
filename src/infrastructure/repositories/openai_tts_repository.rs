use super::batching::split_into_batches;
use super::tts_repository::TtsRepository;
use crate::domain::tts::{SpeedFactor, VoiceInfo, VoiceSelector};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

/// Speed range accepted by the speech endpoint
const MIN_SPEED: f32 = 0.25;
const MAX_SPEED: f32 = 4.0;

const OPENAI_VOICES: &[VoiceInfo] = &[
    VoiceInfo::new("onyx", Some(VoiceSelector::Male)),
    VoiceInfo::new("echo", Some(VoiceSelector::Male)),
    VoiceInfo::new("fable", Some(VoiceSelector::Male)),
    VoiceInfo::new("nova", Some(VoiceSelector::Female)),
    VoiceInfo::new("shimmer", Some(VoiceSelector::Female)),
    VoiceInfo::new("alloy", None),
];

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    /// Call OpenAI TTS API to synthesize a single text batch
    async fn call_openai(&self, text: &str, voice: Voice, speed: f32) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = %self.model,
            voice = ?voice,
            speed = speed,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice,
            response_format: None, // Defaults to MP3
            speed: Some(speed),
        };

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    text_length = text.len(),
                    "OpenAI TTS API call failed"
                );
                format!("OpenAI TTS error: {}", e)
            })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}

/// Map a catalog id onto the SDK voice enum
fn to_sdk_voice(id: &str) -> Voice {
    match id {
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        _ => Voice::Alloy,
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    fn provider(&self) -> &'static str {
        "openai"
    }

    fn voices(&self) -> &'static [VoiceInfo] {
        OPENAI_VOICES
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceInfo,
        speed: SpeedFactor,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let speed = speed.clamped(MIN_SPEED, MAX_SPEED);

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            batch_count = batches.len(),
            text_length = text.len(),
            "Text split into batches"
        );

        let mut audio_data = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let chunk = self
                .call_openai(batch, to_sdk_voice(voice.id), speed)
                .await?;
            audio_data.extend(chunk);

            tracing::debug!(
                batch_index = index,
                total_audio_size = audio_data.len(),
                "Batch synthesized and merged"
            );
        }

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = voice.id,
            speed = speed,
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}
