use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::AudioDecoder;
use crate::application::services::{
    AudioLimits, ModelRegistry, SpeakingScorer, TranscriptionService, WritingScorer,
};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub writing_scorer: Arc<WritingScorer>,
    pub speaking_scorer: Arc<SpeakingScorer>,
    pub transcription_service: Arc<TranscriptionService>,
    /// Configured Whisper size or hub id, reported by `/health`.
    pub whisper_model: String,
}

impl AppState {
    pub fn new(
        registry: Arc<ModelRegistry>,
        decoder: Arc<dyn AudioDecoder>,
        limits: AudioLimits,
        inference_timeout: Duration,
        whisper_model: impl Into<String>,
    ) -> Self {
        Self {
            writing_scorer: Arc::new(WritingScorer::new(
                Arc::clone(&registry),
                inference_timeout,
            )),
            speaking_scorer: Arc::new(SpeakingScorer::new(
                Arc::clone(&registry),
                inference_timeout,
            )),
            transcription_service: Arc::new(TranscriptionService::new(
                Arc::clone(&registry),
                decoder,
                limits,
                inference_timeout,
            )),
            registry,
            whisper_model: whisper_model.into(),
        }
    }
}
