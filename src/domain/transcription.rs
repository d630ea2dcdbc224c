use std::fmt;
use std::str::FromStr;

/// Sample rate of decoded PCM fed to the speech model.
pub const SAMPLE_RATE: u32 = 16_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscriptionTask {
    #[default]
    Transcribe,
    Translate,
}

impl TranscriptionTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionTask::Transcribe => "transcribe",
            TranscriptionTask::Translate => "translate",
        }
    }
}

impl FromStr for TranscriptionTask {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transcribe" => Ok(TranscriptionTask::Transcribe),
            "translate" => Ok(TranscriptionTask::Translate),
            other => Err(format!(
                "Invalid task: {}. Expected: transcribe or translate",
                other
            )),
        }
    }
}

impl fmt::Display for TranscriptionTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub start: f32,
    pub end: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    pub text: String,
    pub detected_language: String,
    pub duration_seconds: f32,
    pub confidence: Option<f32>,
    pub segments: Vec<TranscriptSegment>,
}

impl TranscriptionResult {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// `1 - mean(no_speech_prob)`; `None` when there are no segments.
pub fn confidence_from_no_speech(no_speech_probs: &[f32]) -> Option<f32> {
    if no_speech_probs.is_empty() {
        return None;
    }
    let mean = no_speech_probs.iter().sum::<f32>() / no_speech_probs.len() as f32;
    Some(1.0 - mean)
}
