use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use std::sync::Arc;

use crate::{
    controllers::page::render_index_page,
    domain::{
        conversion::{ConversionService, ConversionServiceApi, ConvertedAudio, UploadedDocument},
        tts::{SpeedFactor, VoiceSelector},
    },
    error::{AppError, AppResult},
    infrastructure::storage::AudioStore,
};

pub struct ConversionController {
    conversion_service: Arc<ConversionService>,
    audio_store: Arc<AudioStore>,
}

/// Raw multipart fields of the upload form
#[derive(Debug, Default)]
struct UploadForm {
    document: Option<UploadedDocument>,
    voice: Option<String>,
    speed: Option<String>,
}

impl ConversionController {
    pub fn new(conversion_service: Arc<ConversionService>, audio_store: Arc<AudioStore>) -> Self {
        Self {
            conversion_service,
            audio_store,
        }
    }

    /// GET / - Upload form and the list of generated audio files
    pub async fn index(State(controller): State<Arc<ConversionController>>) -> AppResult<Html<String>> {
        let artifacts = controller.audio_store.list().await?;
        let rows: Vec<(String, String)> = artifacts
            .into_iter()
            .map(|a| {
                let url = controller.conversion_service.audio_url(&a.filename);
                (a.filename, url)
            })
            .collect();

        Ok(Html(render_index_page(&rows)))
    }

    /// POST / - Convert an uploaded PDF to an audio file
    pub async fn upload(
        State(controller): State<Arc<ConversionController>>,
        multipart: Multipart,
    ) -> AppResult<Json<ConvertedAudio>> {
        let form = read_upload_form(multipart).await?;

        let document = form
            .document
            .ok_or_else(|| AppError::BadRequest("No file part".to_string()))?;

        let voice = form
            .voice
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.parse::<VoiceSelector>())
            .transpose()
            .map_err(AppError::BadRequest)?
            .unwrap_or_default();

        let speed = form
            .speed
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.parse::<SpeedFactor>())
            .transpose()
            .map_err(AppError::BadRequest)?
            .unwrap_or_default();

        let converted = controller
            .conversion_service
            .convert(document, voice, speed)
            .await?;

        Ok(Json(converted))
    }
}

async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);

        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                form.document = Some(UploadedDocument {
                    filename,
                    data: data.to_vec(),
                });
            }
            Some("voice") => form.voice = Some(field.text().await.map_err(multipart_error)?),
            Some("speed") => form.speed = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Uploaded file is too large".to_string())
    } else {
        AppError::BadRequest(format!("Invalid upload: {}", err.body_text()))
    }
}
