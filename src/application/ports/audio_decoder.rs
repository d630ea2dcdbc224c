use std::path::Path;

/// Decodes an audio file to 16 kHz mono `f32` PCM.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<Vec<f32>, AudioDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
