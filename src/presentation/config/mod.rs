mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ENABLE_WHISPER_VAR, InferenceSettings, LoggingSettings, MODEL_DIR_VAR, ModelSettings,
    ServerSettings, Settings, TranscriptionSettings,
};
