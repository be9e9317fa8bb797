use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// What `/health/ready` inspects
pub struct Readiness {
    pub upload_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub tts_provider: &'static str,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(readiness): State<Arc<Readiness>>) -> impl IntoResponse {
    let uploads_ok = is_writable_dir(&readiness.upload_dir).await;
    let audio_ok = is_writable_dir(&readiness.audio_dir).await;

    let status = if uploads_ok && audio_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
            "storage": {
                "uploads": if uploads_ok { "writable" } else { "unavailable" },
                "audio": if audio_ok { "writable" } else { "unavailable" },
            },
            "tts": readiness.tts_provider,
        })),
    )
}

async fn is_writable_dir(dir: &Path) -> bool {
    match tokio::fs::metadata(dir).await {
        Ok(metadata) => metadata.is_dir() && !metadata.permissions().readonly(),
        Err(_) => false,
    }
}
