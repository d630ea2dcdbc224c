mod audio_upload;
mod error;
mod health;
mod payloads;
mod root;
mod speaking;
mod transcribe;
mod writing;

pub use error::{ApiError, ErrorResponse};
pub use health::health_handler;
pub use root::root_handler;
pub use speaking::{
    UNINTELLIGIBLE_AUDIO, score_speaking_audio_handler, score_speaking_text_handler,
};
pub use transcribe::transcribe_handler;
pub use writing::score_writing_handler;
