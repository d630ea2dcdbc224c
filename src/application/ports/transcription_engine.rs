use async_trait::async_trait;

use crate::domain::TranscriptionTask;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribes 16 kHz mono PCM samples.
    async fn transcribe(
        &self,
        pcm: Vec<f32>,
        request: TranscriptionRequest,
    ) -> Result<EngineTranscript, TranscriptionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    /// `None` asks the engine to detect the language.
    pub language: Option<String>,
    pub task: TranscriptionTask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSegment {
    pub start: f32,
    pub end: f32,
    pub text: String,
    pub no_speech_prob: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineTranscript {
    pub text: String,
    pub language: String,
    pub segments: Vec<EngineSegment>,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
}
