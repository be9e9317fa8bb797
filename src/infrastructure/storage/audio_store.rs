use super::error::StorageError;
use crate::domain::document::is_safe_filename;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const AUDIO_EXTENSION: &str = "mp3";

/// A generated audio file as seen by the directory listing
#[derive(Debug, Clone, Serialize)]
pub struct AudioArtifact {
    pub filename: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
}

/// Directory of generated audio artifacts.
///
/// The directory listing is the catalog: there is no metadata besides the
/// files themselves. Writes go through a hidden `.part` file and a rename so
/// a listed artifact is always complete.
pub struct AudioStore {
    dir: PathBuf,
    reserved: Arc<Mutex<HashSet<String>>>,
}

impl AudioStore {
    /// Open the store, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            reserved: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_filename(filename) {
            return Err(StorageError::InvalidName(filename.to_string()));
        }
        Ok(self.dir.join(filename))
    }

    /// Audio artifacts, most recently modified first
    pub async fn list(&self) -> Result<Vec<AudioArtifact>, StorageError> {
        let mut artifacts = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(AUDIO_EXTENSION) {
                continue;
            }

            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };

            artifacts.push(AudioArtifact {
                filename,
                size_bytes: metadata.len(),
                modified_at: DateTime::<Utc>::from(metadata.modified()?),
            });
        }

        artifacts.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });

        Ok(artifacts)
    }

    pub async fn exists(&self, filename: &str) -> bool {
        match self.path_for(filename) {
            Ok(path) => tokio::fs::metadata(path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(filename)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove an artifact. Returns `false` when there was nothing to remove.
    pub async fn delete(&self, filename: &str) -> Result<bool, StorageError> {
        let path = self.path_for(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `bytes` under `filename`, replacing any previous content
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let target = self.path_for(filename)?;
        let partial = self.dir.join(format!(".{}.part", filename));

        if let Err(e) = tokio::fs::write(&partial, bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&partial, &target).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }

        Ok(())
    }

    /// Claim a fresh artifact name for `base` at `timestamp`.
    ///
    /// The first claim gets `{base}_{timestamp}.mp3`; while that name exists
    /// on disk or is held by another job, `_1`, `_2`, ... is appended. The
    /// name stays claimed until the returned guard is dropped.
    ///
    /// A candidate is claimed in memory before the disk is checked, and the
    /// lock is never held across the check. A holder that writes the file
    /// releases its name only afterwards, so a released name is either
    /// visible on disk or free to take.
    pub async fn reserve(&self, base: &str, timestamp: i64) -> ReservedName {
        let mut attempt: u32 = 0;

        loop {
            let candidate = if attempt == 0 {
                format!("{}_{}.{}", base, timestamp, AUDIO_EXTENSION)
            } else {
                format!("{}_{}_{}.{}", base, timestamp, attempt, AUDIO_EXTENSION)
            };
            attempt += 1;

            let claimed = self.reserved.lock().insert(candidate.clone());
            if !claimed {
                continue;
            }

            let guard = ReservedName {
                filename: candidate,
                reserved: self.reserved.clone(),
            };
            let on_disk = tokio::fs::metadata(self.dir.join(guard.filename()))
                .await
                .is_ok();
            if !on_disk {
                return guard;
            }
            // Dropping the guard releases the candidate
        }
    }
}

/// An artifact name held for one conversion job
#[derive(Debug)]
pub struct ReservedName {
    filename: String,
    reserved: Arc<Mutex<HashSet<String>>>,
}

impl ReservedName {
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl Drop for ReservedName {
    fn drop(&mut self) {
        self.reserved.lock().remove(&self.filename);
    }
}
