use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use ielts_scoring::application::ports::{
    AudioDecoder, AudioDecoderError, EngineSegment, EngineTranscript, InferenceError,
    ModelLoadError, ModelLoader, SequenceClassifier, TranscriptionEngine, TranscriptionError,
    TranscriptionRequest,
};
use ielts_scoring::domain::{ClassifierKind, SAMPLE_RATE};

/// Logits whose argmax is `index`, with the runner-up one class above it.
pub fn peaked_logits(num_classes: usize, index: usize) -> Vec<f32> {
    (0..num_classes)
        .map(|i| {
            if i == index {
                5.0
            } else if i == (index + 1) % num_classes {
                3.0
            } else {
                0.0
            }
        })
        .collect()
}

pub struct MockClassifier {
    pub logits: Vec<f32>,
    pub num_labels: usize,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl MockClassifier {
    pub fn new(logits: Vec<f32>) -> Self {
        Self {
            num_labels: logits.len(),
            logits,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl SequenceClassifier for MockClassifier {
    fn num_labels(&self) -> usize {
        self.num_labels
    }

    async fn classify(&self, _text: &str) -> Result<Vec<f32>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.logits.clone())
    }
}

pub struct MockEngine {
    pub text: String,
    pub no_speech_probs: Vec<f32>,
    pub requests: Mutex<Vec<TranscriptionRequest>>,
}

impl MockEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            no_speech_probs: vec![0.1, 0.3],
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for MockEngine {
    async fn transcribe(
        &self,
        pcm: Vec<f32>,
        request: TranscriptionRequest,
    ) -> Result<EngineTranscript, TranscriptionError> {
        let language = request.language.clone().unwrap_or_else(|| "vi".to_string());
        self.requests.lock().unwrap().push(request);

        let duration = pcm.len() as f32 / SAMPLE_RATE as f32;
        let count = self.no_speech_probs.len() as f32;
        let segments = self
            .no_speech_probs
            .iter()
            .enumerate()
            .map(|(i, &p)| EngineSegment {
                start: duration * i as f32 / count,
                end: duration * (i + 1) as f32 / count,
                text: format!(" part {} ", i),
                no_speech_prob: p,
            })
            .collect();

        Ok(EngineTranscript {
            text: format!("  {}  ", self.text),
            language,
            segments,
        })
    }
}

/// Loader whose behavior is fixed per model kind. Load counts are recorded
/// so tests can assert on caching.
pub struct MockLoader {
    pub writing: Option<Arc<MockClassifier>>,
    pub speaking: Option<Arc<MockClassifier>>,
    pub engine: Option<Arc<MockEngine>>,
    pub writing_loads: AtomicUsize,
    pub speaking_loads: AtomicUsize,
    pub engine_loads: AtomicUsize,
    /// Engine loads that fail before the configured engine is returned.
    pub engine_failures: AtomicUsize,
    pub load_delay: Option<Duration>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self {
            writing: None,
            speaking: None,
            engine: None,
            writing_loads: AtomicUsize::new(0),
            speaking_loads: AtomicUsize::new(0),
            engine_loads: AtomicUsize::new(0),
            engine_failures: AtomicUsize::new(0),
            load_delay: None,
        }
    }

    pub fn with_writing(mut self, classifier: MockClassifier) -> Self {
        self.writing = Some(Arc::new(classifier));
        self
    }

    pub fn with_speaking(mut self, classifier: MockClassifier) -> Self {
        self.speaking = Some(Arc::new(classifier));
        self
    }

    pub fn with_engine(mut self, engine: MockEngine) -> Self {
        self.engine = Some(Arc::new(engine));
        self
    }

    pub fn with_engine_failures(self, failures: usize) -> Self {
        self.engine_failures.store(failures, Ordering::SeqCst);
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = Some(delay);
        self
    }

    /// Writing band index 6 (6.5) and speaking level index 3 (B2).
    pub fn all_models() -> Self {
        Self::new()
            .with_writing(MockClassifier::new(peaked_logits(12, 6)))
            .with_speaking(MockClassifier::new(peaked_logits(6, 3)))
            .with_engine(MockEngine::new(
                "I usually spend my weekends reading books and walking in the park.",
            ))
    }
}

impl ModelLoader for MockLoader {
    fn is_present(&self, kind: ClassifierKind) -> bool {
        match kind {
            ClassifierKind::Writing => self.writing.is_some(),
            ClassifierKind::Speaking => self.speaking.is_some(),
        }
    }

    fn load_classifier(
        &self,
        kind: ClassifierKind,
    ) -> Result<Arc<dyn SequenceClassifier>, ModelLoadError> {
        if let Some(delay) = self.load_delay {
            std::thread::sleep(delay);
        }
        let (slot, counter) = match kind {
            ClassifierKind::Writing => (&self.writing, &self.writing_loads),
            ClassifierKind::Speaking => (&self.speaking, &self.speaking_loads),
        };
        counter.fetch_add(1, Ordering::SeqCst);
        match slot {
            Some(classifier) => Ok(Arc::clone(classifier) as Arc<dyn SequenceClassifier>),
            None => Err(ModelLoadError::Unavailable(format!("{} model not found", kind))),
        }
    }

    fn load_transcription_engine(&self) -> Result<Arc<dyn TranscriptionEngine>, ModelLoadError> {
        let attempt = self.engine_loads.fetch_add(1, Ordering::SeqCst);
        if attempt < self.engine_failures.load(Ordering::SeqCst) {
            return Err(ModelLoadError::LoadFailed("hub unreachable".to_string()));
        }
        match &self.engine {
            Some(engine) => Ok(Arc::clone(engine) as Arc<dyn TranscriptionEngine>),
            None => Err(ModelLoadError::LoadFailed("hub unreachable".to_string())),
        }
    }

    fn device_name(&self) -> String {
        "cpu".to_string()
    }
}

/// Decoder returning a fixed number of silent samples. Records the staged
/// paths it was given.
pub struct MockDecoder {
    pub samples: usize,
    pub fail: bool,
    pub seen_paths: Mutex<Vec<PathBuf>>,
}

impl MockDecoder {
    pub fn with_duration(seconds: f32) -> Self {
        Self {
            samples: (seconds * SAMPLE_RATE as f32) as usize,
            fail: false,
            seen_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            samples: 0,
            fail: true,
            seen_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn last_path(&self) -> Option<PathBuf> {
        self.seen_paths.lock().unwrap().last().cloned()
    }
}

impl AudioDecoder for MockDecoder {
    fn decode(&self, path: &Path) -> Result<Vec<f32>, AudioDecoderError> {
        assert!(path.exists(), "staged audio must exist while decoding");
        self.seen_paths.lock().unwrap().push(path.to_path_buf());
        if self.fail {
            return Err(AudioDecoderError::DecodingFailed("corrupt stream".to_string()));
        }
        Ok(vec![0.0; self.samples])
    }
}
