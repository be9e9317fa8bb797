use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("invalid filename: {0}")]
    InvalidName(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            // Unsafe names can never address a stored file
            StorageError::NotFound(_) | StorageError::InvalidName(_) => {
                AppError::NotFound("File not found".to_string())
            }
            StorageError::Io(e) => AppError::Internal(e.to_string()),
        }
    }
}
