use super::batching::split_into_batches;
use super::tts_repository::TtsRepository;
use crate::domain::tts::{SpeedFactor, VoiceInfo, VoiceSelector};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, TextType, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// Neural prosody rates Polly accepts, in percent
const MIN_RATE_PERCENT: f32 = 20.0;
const MAX_RATE_PERCENT: f32 = 200.0;

/// US English neural voices
const POLLY_VOICES: &[VoiceInfo] = &[
    VoiceInfo::new("Matthew", Some(VoiceSelector::Male)),
    VoiceInfo::new("Stephen", Some(VoiceSelector::Male)),
    VoiceInfo::new("Gregory", Some(VoiceSelector::Male)),
    VoiceInfo::new("Joanna", Some(VoiceSelector::Female)),
    VoiceInfo::new("Ruth", Some(VoiceSelector::Female)),
    VoiceInfo::new("Danielle", Some(VoiceSelector::Female)),
];

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(
        &self,
        text: &str,
        voice: &VoiceInfo,
        speed: SpeedFactor,
    ) -> Result<Vec<u8>, String> {
        let voice_id = VoiceId::from(voice.id);
        let engine = Engine::Neural;

        // Rate control is only available through SSML
        let (input, text_type) = if speed.is_normal() {
            (text.to_string(), TextType::Text)
        } else {
            (build_ssml(text, speed), TextType::Ssml)
        };

        tracing::info!(
            voice = voice.id,
            engine = ?engine,
            text_type = ?text_type,
            output_format = "Mp3",
            text_length = text.len(),
            text_preview = preview(text),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(input)
            .text_type(text_type)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice = voice.id,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    fn provider(&self) -> &'static str {
        "polly"
    }

    fn voices(&self) -> &'static [VoiceInfo] {
        POLLY_VOICES
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceInfo,
        speed: SpeedFactor,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            batch_count = batches.len(),
            text_length = text.len(),
            "Text split into batches"
        );

        let mut audio_data = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let chunk = self.call_polly(batch, voice, speed).await?;
            audio_data.extend(chunk);

            tracing::debug!(
                batch_index = index,
                total_audio_size = audio_data.len(),
                "Batch synthesized and merged"
            );
        }

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "polly",
            voice = voice.id,
            speed = speed.value(),
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}

/// Wrap text in a prosody element carrying the requested rate
fn build_ssml(text: &str, speed: SpeedFactor) -> String {
    let rate = (speed.value() * 100.0)
        .clamp(MIN_RATE_PERCENT, MAX_RATE_PERCENT)
        .round() as u32;

    format!(
        "<speak><prosody rate=\"{}%\">{}</prosody></speak>",
        rate,
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
