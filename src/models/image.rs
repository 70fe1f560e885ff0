use serde::{Deserialize, Serialize};

/// An encoded image as it travels through the workflows: a base64 body plus
/// the MIME type it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime: String,
    pub data: String, // Base64 encoded
}

impl ImagePayload {
    pub fn new(mime: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            data: data.into(),
        }
    }
}

/// A photo the user added to the current batch. The ordinal always equals the
/// image's index in the upload sequence and is reassigned on every removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub ordinal: usize,
    pub payload: ImagePayload,
}

/// A raw file handed to ingestion before any filtering has happened.
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Draft,
    Standard,
    High,
}

impl Default for QualityTier {
    fn default() -> Self {
        QualityTier::Standard
    }
}

impl QualityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Draft => "draft",
            QualityTier::Standard => "standard",
            QualityTier::High => "high",
        }
    }
}

/// Progress of the batch generation run. `Generating` carries the transient
/// step counter that exists only while a run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Generating { current: usize, total: usize },
    Ready,
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Idle
    }
}

impl RunState {
    pub fn is_generating(&self) -> bool {
        matches!(self, RunState::Generating { .. })
    }
}
