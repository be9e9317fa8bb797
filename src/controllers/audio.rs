use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::conversion::ConversionService,
    error::{AppError, AppResult},
    infrastructure::storage::{sniff_content_type, AudioStore},
};

/// Response for GET /api/audio
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioListResponse {
    pub files: Vec<AudioFileResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AudioFileResponse {
    pub filename: String,
    pub audio_url: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
}

/// Response for POST /delete/:filename
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

pub struct AudioController {
    audio_store: Arc<AudioStore>,
    conversion_service: Arc<ConversionService>,
}

impl AudioController {
    pub fn new(audio_store: Arc<AudioStore>, conversion_service: Arc<ConversionService>) -> Self {
        Self {
            audio_store,
            conversion_service,
        }
    }

    /// GET /api/audio - List generated audio files, newest first
    pub async fn list(State(controller): State<Arc<AudioController>>) -> AppResult<Json<AudioListResponse>> {
        let artifacts = controller.audio_store.list().await?;

        let files = artifacts
            .into_iter()
            .map(|a| AudioFileResponse {
                audio_url: controller.conversion_service.audio_url(&a.filename),
                filename: a.filename,
                size_bytes: a.size_bytes,
                modified_at: a.modified_at,
            })
            .collect();

        Ok(Json(AudioListResponse { files }))
    }

    /// GET /download/:filename - Download an audio file as an attachment
    pub async fn download(
        State(controller): State<Arc<AudioController>>,
        Path(filename): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let bytes = controller.audio_store.read(&filename).await?;

        tracing::debug!(filename = %filename, size_bytes = bytes.len(), "Serving audio download");

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(sniff_content_type(&bytes)),
        );
        headers.insert(header::CONTENT_DISPOSITION, attachment_header(&filename)?);

        Ok((StatusCode::OK, headers, Body::from(bytes)))
    }

    /// GET {audio_url_prefix}/:filename - Audio for in-browser playback
    pub async fn play(
        State(controller): State<Arc<AudioController>>,
        Path(filename): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let bytes = controller.audio_store.read(&filename).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(sniff_content_type(&bytes)),
        );
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        Ok((StatusCode::OK, headers, Body::from(bytes)))
    }

    /// POST /delete/:filename - Delete an audio file
    ///
    /// Deleting a file that is already gone still succeeds.
    pub async fn delete(
        State(controller): State<Arc<AudioController>>,
        Path(filename): Path<String>,
    ) -> AppResult<Json<DeleteResponse>> {
        let removed = controller.audio_store.delete(&filename).await?;

        if removed {
            tracing::info!(filename = %filename, "Audio file deleted");
        } else {
            tracing::debug!(filename = %filename, "Audio file already absent");
        }

        Ok(Json(DeleteResponse { success: true }))
    }
}

/// `Content-Disposition: attachment` for a name already known to be header-safe
pub(crate) fn attachment_header(filename: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| AppError::Internal(format!("Invalid download filename: {}", e)))
}
