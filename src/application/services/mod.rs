mod model_registry;
mod scoring_error;
mod speaking_scorer;
mod staged_audio;
mod transcription_service;
mod writing_scorer;

pub use model_registry::{ModelRegistry, ModelStatus};
pub use scoring_error::ScoringError;
pub use speaking_scorer::{SpeakingAssessment, SpeakingScorer};
pub use staged_audio::StagedAudio;
pub use transcription_service::{
    AudioLimits, AudioValidationError, TranscribeOptions, TranscriptionService,
    TranscriptionServiceError,
};
pub use writing_scorer::{WritingAssessment, WritingScorer};
