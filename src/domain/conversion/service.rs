use super::dto::{ConvertedAudio, UploadedDocument};
use super::error::{ConversionError, ConversionOutcome};
use crate::domain::document::{artifact_base_name, TextExtractor};
use crate::domain::tts::{SpeedFactor, TtsService, TtsServiceApi, VoiceSelector};
use crate::infrastructure::storage::{AudioStore, StorageError, UploadStore};
use async_trait::async_trait;
use std::sync::Arc;

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

pub struct ConversionService {
    upload_store: Arc<UploadStore>,
    audio_store: Arc<AudioStore>,
    extractor: Arc<dyn TextExtractor>,
    tts_service: Arc<TtsService>,
    audio_url_prefix: String,
    clock: Clock,
}

impl ConversionService {
    pub fn new(
        upload_store: Arc<UploadStore>,
        audio_store: Arc<AudioStore>,
        extractor: Arc<dyn TextExtractor>,
        tts_service: Arc<TtsService>,
        audio_url_prefix: String,
    ) -> Self {
        Self {
            upload_store,
            audio_store,
            extractor,
            tts_service,
            audio_url_prefix,
            clock: Arc::new(|| chrono::Utc::now().timestamp()),
        }
    }

    /// Replace the unix-seconds source used in artifact names
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Public URL under which an artifact is served
    pub fn audio_url(&self, filename: &str) -> String {
        format!("{}/{}", self.audio_url_prefix, urlencoding::encode(filename))
    }
}

#[async_trait]
pub trait ConversionServiceApi: Send + Sync {
    /// Convert an uploaded PDF into a stored audio artifact
    ///
    /// Steps run once, in order, and the first failure ends the request:
    /// validate upload, store it, extract text, reserve a name, synthesize.
    async fn convert(
        &self,
        document: UploadedDocument,
        voice: VoiceSelector,
        speed: SpeedFactor,
    ) -> ConversionOutcome;
}

#[async_trait]
impl ConversionServiceApi for ConversionService {
    async fn convert(
        &self,
        document: UploadedDocument,
        voice: VoiceSelector,
        speed: SpeedFactor,
    ) -> ConversionOutcome {
        tracing::info!(
            filename = %document.filename,
            size_bytes = document.data.len(),
            voice = %voice,
            speed = speed.value(),
            "Conversion request"
        );

        // 1. Validate the upload
        self.validate(&document)?;

        // 2. Store the document in the upload area
        let pdf_path = self
            .upload_store
            .save(&document.filename, &document.data)
            .await
            .map_err(|e| match e {
                StorageError::InvalidName(_) => {
                    ConversionError::Validation("Invalid filename".to_string())
                }
                other => ConversionError::Storage(other.to_string()),
            })?;

        // 3. Extract text; unreadable and blank documents are the same outcome
        let text = match self.extractor.extract(&pdf_path).await {
            Ok(text) if !text.is_blank() => text,
            Ok(_) => {
                tracing::warn!(filename = %document.filename, "Document has no extractable text");
                return Err(ConversionError::EmptyOrUnreadable);
            }
            Err(e) => {
                tracing::warn!(filename = %document.filename, error = %e, "Document could not be read");
                return Err(ConversionError::EmptyOrUnreadable);
            }
        };

        // 4. Claim the artifact name
        let base_name = artifact_base_name(&document.filename);
        let reserved = self.audio_store.reserve(&base_name, (self.clock)()).await;

        // 5. Synthesize into the audio store
        let result = self
            .tts_service
            .synthesize_to(text.as_str(), voice, speed, reserved.filename())
            .await
            .map_err(|e| {
                tracing::error!(
                    filename = reserved.filename(),
                    error = %e,
                    "Synthesis failed"
                );
                ConversionError::SynthesisFailure(e.to_string())
            })?;

        tracing::info!(
            filename = %result.filename,
            voice = result.voice_id,
            char_count = result.char_count,
            audio_size_bytes = result.audio_size_bytes,
            "Conversion completed"
        );

        Ok(ConvertedAudio {
            audio_url: self.audio_url(&result.filename),
            filename: result.filename,
        })
    }
}

impl ConversionService {
    fn validate(&self, document: &UploadedDocument) -> Result<(), ConversionError> {
        let filename = document.filename.trim();

        if filename.is_empty() {
            return Err(ConversionError::Validation("No selected file".to_string()));
        }
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(ConversionError::Validation(
                "Only PDF files are supported".to_string(),
            ));
        }
        if document.data.is_empty() {
            return Err(ConversionError::Validation(
                "Uploaded file is empty".to_string(),
            ));
        }

        Ok(())
    }
}
