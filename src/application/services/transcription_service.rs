use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AudioDecoder, AudioDecoderError, ModelLoadError, TranscriptionError, TranscriptionRequest,
};
use crate::domain::{
    AudioFormat, SAMPLE_RATE, TranscriptSegment, TranscriptionResult, TranscriptionTask,
    confidence_from_no_speech,
};

use super::model_registry::ModelRegistry;
use super::staged_audio::StagedAudio;

const BYTES_PER_MB: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioLimits {
    pub max_file_size_bytes: usize,
    pub max_duration_secs: f32,
}

impl AudioLimits {
    pub fn new(max_file_size_mb: usize, max_duration_secs: f32) -> Self {
        Self {
            max_file_size_bytes: max_file_size_mb * BYTES_PER_MB,
            max_duration_secs,
        }
    }

    pub fn max_file_size_mb(&self) -> usize {
        self.max_file_size_bytes / BYTES_PER_MB
    }
}

impl Default for AudioLimits {
    fn default() -> Self {
        Self::new(25, 300.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioValidationError {
    #[error("Audio file is empty")]
    Empty,
    #[error("Unsupported audio format: {extension}. Supported formats: {supported}")]
    UnsupportedFormat { extension: String, supported: String },
    #[error("Audio file too large: {size_mb:.1}MB. Maximum size: {max_mb}MB")]
    TooLarge { size_mb: f64, max_mb: usize },
    #[error("Audio too long: {seconds:.1}s. Maximum duration: {max_seconds}s")]
    TooLong { seconds: f32, max_seconds: f32 },
}

impl AudioValidationError {
    pub fn reason(&self) -> &'static str {
        match self {
            AudioValidationError::Empty => "empty",
            AudioValidationError::UnsupportedFormat { .. } => "unsupported format",
            AudioValidationError::TooLarge { .. } => "too large",
            AudioValidationError::TooLong { .. } => "too long",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error(transparent)]
    Validation(#[from] AudioValidationError),
    #[error("speech-to-text is disabled")]
    Disabled,
    #[error("transcription model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("transcription failed: {0}")]
    Failure(String),
    #[error("transcription timed out after {0:?}")]
    Timeout(Duration),
}

impl From<ModelLoadError> for TranscriptionServiceError {
    fn from(err: ModelLoadError) -> Self {
        match err {
            ModelLoadError::Disabled(_) => TranscriptionServiceError::Disabled,
            other => TranscriptionServiceError::ModelUnavailable(other.to_string()),
        }
    }
}

impl From<TranscriptionError> for TranscriptionServiceError {
    fn from(err: TranscriptionError) -> Self {
        TranscriptionServiceError::Failure(err.to_string())
    }
}

impl From<AudioDecoderError> for TranscriptionServiceError {
    fn from(err: AudioDecoderError) -> Self {
        TranscriptionServiceError::Failure(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscribeOptions {
    pub language: Option<String>,
    pub task: TranscriptionTask,
    pub include_segments: bool,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            language: Some("en".to_string()),
            task: TranscriptionTask::Transcribe,
            include_segments: false,
        }
    }
}

pub struct TranscriptionService {
    registry: Arc<ModelRegistry>,
    decoder: Arc<dyn AudioDecoder>,
    limits: AudioLimits,
    timeout: Duration,
}

impl TranscriptionService {
    pub fn new(
        registry: Arc<ModelRegistry>,
        decoder: Arc<dyn AudioDecoder>,
        limits: AudioLimits,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            decoder,
            limits,
            timeout,
        }
    }

    pub fn limits(&self) -> AudioLimits {
        self.limits
    }

    pub fn is_enabled(&self) -> bool {
        self.registry.transcription_enabled()
    }

    /// Structural checks that need no decoding: emptiness, extension, size.
    pub fn validate_upload(
        &self,
        data: &[u8],
        filename: &str,
    ) -> Result<AudioFormat, AudioValidationError> {
        if data.is_empty() {
            return Err(AudioValidationError::Empty);
        }

        let format = AudioFormat::from_filename(filename).map_err(|extension| {
            AudioValidationError::UnsupportedFormat {
                extension,
                supported: AudioFormat::supported_extensions().join(", "),
            }
        })?;

        if data.len() > self.limits.max_file_size_bytes {
            return Err(AudioValidationError::TooLarge {
                size_mb: data.len() as f64 / BYTES_PER_MB as f64,
                max_mb: self.limits.max_file_size_mb(),
            });
        }

        Ok(format)
    }

    pub async fn transcribe(
        &self,
        data: &[u8],
        filename: &str,
        options: TranscribeOptions,
    ) -> Result<TranscriptionResult, TranscriptionServiceError> {
        if !self.is_enabled() {
            return Err(TranscriptionServiceError::Disabled);
        }

        let format = self.validate_upload(data, filename)?;

        let decoder = Arc::clone(&self.decoder);
        let bytes = data.to_vec();
        let (staged, pcm) = tokio::task::spawn_blocking(
            move || -> Result<(StagedAudio, Vec<f32>), TranscriptionServiceError> {
                let staged = StagedAudio::write(&bytes, format).map_err(|e| {
                    TranscriptionServiceError::Failure(format!("stage audio: {}", e))
                })?;
                let pcm = decoder.decode(staged.path())?;
                Ok((staged, pcm))
            },
        )
        .await
        .map_err(|e| TranscriptionServiceError::Failure(format!("decode task: {}", e)))??;

        let duration_seconds = pcm.len() as f32 / SAMPLE_RATE as f32;
        if duration_seconds > self.limits.max_duration_secs {
            return Err(AudioValidationError::TooLong {
                seconds: duration_seconds,
                max_seconds: self.limits.max_duration_secs,
            }
            .into());
        }

        let engine = self.registry.transcription_engine().await?;

        tracing::info!(
            duration_secs = duration_seconds,
            format = format.extension(),
            language = options.language.as_deref().unwrap_or("auto"),
            task = %options.task,
            "Transcribing audio"
        );

        let request = TranscriptionRequest {
            language: options.language.clone(),
            task: options.task,
        };
        let transcript = tokio::time::timeout(self.timeout, engine.transcribe(pcm, request))
            .await
            .map_err(|_| TranscriptionServiceError::Timeout(self.timeout))??;

        drop(staged);

        let (segments, confidence) = if options.include_segments {
            let no_speech: Vec<f32> = transcript.segments.iter().map(|s| s.no_speech_prob).collect();
            let segments = transcript
                .segments
                .into_iter()
                .map(|s| TranscriptSegment {
                    start: s.start,
                    end: s.end,
                    text: s.text.trim().to_string(),
                })
                .collect();
            (segments, confidence_from_no_speech(&no_speech))
        } else {
            (Vec::new(), None)
        };

        let result = TranscriptionResult {
            text: transcript.text.trim().to_string(),
            detected_language: transcript.language,
            duration_seconds,
            confidence,
            segments,
        };

        tracing::info!(
            words = result.word_count(),
            language = %result.detected_language,
            "Transcription complete"
        );

        Ok(result)
    }
}
