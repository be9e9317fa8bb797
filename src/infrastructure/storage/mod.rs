pub mod audio_format;
pub mod audio_store;
pub mod error;
pub mod upload_store;

pub use audio_format::sniff_content_type;
pub use audio_store::{AudioArtifact, AudioStore, ReservedName, AUDIO_EXTENSION};
pub use error::StorageError;
pub use upload_store::UploadStore;
