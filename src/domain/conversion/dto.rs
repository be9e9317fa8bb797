use serde::{Deserialize, Serialize};

/// A document as received from the client
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Response for a successful POST /
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedAudio {
    pub audio_url: String,
    pub filename: String,
}
