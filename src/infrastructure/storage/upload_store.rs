use super::error::StorageError;
use crate::domain::document::{is_safe_filename, sanitize_filename};
use std::path::{Path, PathBuf};

/// Landing directory for uploaded documents
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store an upload as `{uuid}_{sanitized}` and return where it landed.
    ///
    /// Every call gets its own file, so concurrent uploads sharing a client
    /// filename never read each other's document.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let sanitized = sanitize_filename(filename);
        if !is_safe_filename(&sanitized) {
            return Err(StorageError::InvalidName(filename.to_string()));
        }

        let stored_name = format!("{}_{}", uuid::Uuid::new_v4().simple(), sanitized);
        let target = self.dir.join(&stored_name);
        let partial = self.dir.join(format!(".{}.part", stored_name));

        tokio::fs::write(&partial, bytes).await?;
        if let Err(e) = tokio::fs::rename(&partial, &target).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }

        tracing::debug!(
            original_filename = filename,
            stored_as = %target.display(),
            size_bytes = bytes.len(),
            "Upload stored"
        );

        Ok(target)
    }
}
