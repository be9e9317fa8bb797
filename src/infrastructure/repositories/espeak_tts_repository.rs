use super::tts_repository::TtsRepository;
use crate::domain::tts::{SpeedFactor, VoiceInfo, VoiceSelector};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// espeak-ng default speaking rate in words per minute
const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const MIN_WORDS_PER_MINUTE: f32 = 80.0;
const MAX_WORDS_PER_MINUTE: f32 = 450.0;

/// English with espeak-ng voice variants
const ESPEAK_VOICES: &[VoiceInfo] = &[
    VoiceInfo::new("en+m3", Some(VoiceSelector::Male)),
    VoiceInfo::new("en+m1", Some(VoiceSelector::Male)),
    VoiceInfo::new("en+f3", Some(VoiceSelector::Female)),
    VoiceInfo::new("en+f2", Some(VoiceSelector::Female)),
];

/// Local offline synthesis through the espeak-ng binary.
///
/// Every job spawns its own process, so voice and rate never leak between
/// concurrent requests. The child is killed if the job future is dropped.
pub struct EspeakTtsRepository {
    executable: String,
}

impl EspeakTtsRepository {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    fn words_per_minute(speed: SpeedFactor) -> u32 {
        (BASE_WORDS_PER_MINUTE * speed.value())
            .clamp(MIN_WORDS_PER_MINUTE, MAX_WORDS_PER_MINUTE)
            .round() as u32
    }
}

#[async_trait]
impl TtsRepository for EspeakTtsRepository {
    fn provider(&self) -> &'static str {
        "espeak"
    }

    fn voices(&self) -> &'static [VoiceInfo] {
        ESPEAK_VOICES
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceInfo,
        speed: SpeedFactor,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let words_per_minute = Self::words_per_minute(speed);

        tracing::info!(
            executable = %self.executable,
            voice = voice.id,
            words_per_minute = words_per_minute,
            text_length = text.len(),
            "Running espeak-ng"
        );

        let mut child = Command::new(&self.executable)
            .arg("-v")
            .arg(voice.id)
            .arg("-s")
            .arg(words_per_minute.to_string())
            .arg("--stdin")
            .arg("--stdout")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    format!("espeak-ng not found at '{}'", self.executable)
                } else {
                    format!("Failed to run espeak-ng: {}", e)
                }
            })?;

        // Feed stdin while stdout is drained, long documents overflow the pipe otherwise
        let stdin = child.stdin.take();
        let input = text.as_bytes().to_vec();
        let writer = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&input).await?;
            }
            Ok::<(), std::io::Error>(())
        };

        let (written, output) = tokio::join!(writer, child.wait_with_output());
        let output = output.map_err(|e| format!("Failed to wait for espeak-ng: {}", e))?;
        written.map_err(|e| format!("Failed to write to espeak-ng stdin: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(status = %output.status, stderr = %stderr.trim(), "espeak-ng failed");
            return Err(format!(
                "espeak-ng exited with status {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        tracing::info!(
            provider = "espeak",
            voice = voice.id,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = output.stdout.len(),
            "TTS synthesis completed"
        );

        Ok(output.stdout)
    }
}
