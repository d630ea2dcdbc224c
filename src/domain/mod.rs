mod audio_format;
mod band;
mod cefr_level;
mod classification;
mod classifier_kind;
mod feedback;
mod transcription;

pub use audio_format::AudioFormat;
pub use band::{BandPrediction, RankedBand, TOP_PREDICTIONS, WRITING_BANDS};
pub use cefr_level::{CefrLevel, CefrPrediction};
pub use classification::{ClassificationResult, argmax, softmax};
pub use classifier_kind::ClassifierKind;
pub use feedback::{FeedbackBundle, FeedbackDomain, feedback_for};
pub use transcription::{
    SAMPLE_RATE, TranscriptSegment, TranscriptionResult, TranscriptionTask,
    confidence_from_no_speech,
};
