use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
};
use std::{path::PathBuf, sync::Arc};

use crate::{
    controllers::audio::attachment_header,
    error::{AppError, AppResult},
};

const APP_NOT_FOUND: &str = "App not found on server";

pub struct DesktopAppController {
    app_path: PathBuf,
}

impl DesktopAppController {
    pub fn new(app_path: PathBuf) -> Self {
        Self { app_path }
    }

    /// GET /download_app - Download the desktop client binary
    pub async fn download(State(controller): State<Arc<DesktopAppController>>) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let bytes = match tokio::fs::read(&controller.app_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %controller.app_path.display(), "Desktop app is not deployed");
                return Err(AppError::NotFound(APP_NOT_FOUND.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let filename = controller
            .app_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.exe");

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        );
        headers.insert(header::CONTENT_DISPOSITION, attachment_header(filename)?);

        Ok((StatusCode::OK, headers, Body::from(bytes)))
    }
}
