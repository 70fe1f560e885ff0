use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestyleError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Ingestion error: {0}")]
    IngestError(String),
    #[error("Generation error: {0}")]
    GenerationError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, RestyleError>;
