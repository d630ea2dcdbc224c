mod audio_decoder;
mod model_loader;
mod sequence_classifier;
mod transcription_engine;

pub use audio_decoder::{AudioDecoder, AudioDecoderError};
pub use model_loader::{ModelLoadError, ModelLoader};
pub use sequence_classifier::{InferenceError, SequenceClassifier};
pub use transcription_engine::{
    EngineSegment, EngineTranscript, TranscriptionEngine, TranscriptionError,
    TranscriptionRequest,
};
