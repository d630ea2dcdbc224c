use std::path::PathBuf;
use std::sync::Arc;

use candle_core::Device;

use crate::application::ports::{
    ModelLoadError, ModelLoader, SequenceClassifier, TranscriptionEngine, TranscriptionError,
};
use crate::domain::ClassifierKind;
use crate::infrastructure::audio::CandleWhisperEngine;
use crate::infrastructure::classifier::{
    CONFIG_FILE, CandleSequenceClassifier, TOKENIZER_FILE, WEIGHTS_FILE,
};

use super::device::{device_label, select_device};

#[derive(Debug, Clone)]
pub struct CandleModelConfig {
    pub root_dir: PathBuf,
    pub writing_dir: String,
    pub speaking_dir: String,
    pub writing_max_length: usize,
    pub speaking_max_length: usize,
    pub whisper_model: String,
    pub use_gpu: bool,
}

pub struct CandleModelLoader {
    config: CandleModelConfig,
    device: Device,
}

impl CandleModelLoader {
    pub fn new(config: CandleModelConfig) -> Self {
        let device = select_device(config.use_gpu);
        tracing::info!(device = device_label(&device), "Selected compute device");
        Self { config, device }
    }

    pub fn model_dir(&self, kind: ClassifierKind) -> PathBuf {
        let dir = match kind {
            ClassifierKind::Writing => &self.config.writing_dir,
            ClassifierKind::Speaking => &self.config.speaking_dir,
        };
        self.config.root_dir.join(dir)
    }

    fn max_length(&self, kind: ClassifierKind) -> usize {
        match kind {
            ClassifierKind::Writing => self.config.writing_max_length,
            ClassifierKind::Speaking => self.config.speaking_max_length,
        }
    }
}

/// Accepts a bare size such as `base` or a full hub id.
pub fn resolve_whisper_model_id(model: &str) -> String {
    if model.contains('/') {
        model.to_string()
    } else {
        format!("openai/whisper-{}", model)
    }
}

impl ModelLoader for CandleModelLoader {
    fn is_present(&self, kind: ClassifierKind) -> bool {
        let dir = self.model_dir(kind);
        [CONFIG_FILE, TOKENIZER_FILE, WEIGHTS_FILE]
            .iter()
            .all(|file| dir.join(file).is_file())
    }

    fn load_classifier(
        &self,
        kind: ClassifierKind,
    ) -> Result<Arc<dyn SequenceClassifier>, ModelLoadError> {
        let dir = self.model_dir(kind);
        if !self.is_present(kind) {
            return Err(ModelLoadError::Unavailable(format!(
                "{} model not found at {}",
                kind,
                dir.display()
            )));
        }

        let classifier = CandleSequenceClassifier::load(
            &dir,
            self.max_length(kind),
            kind.num_classes(),
            self.device.clone(),
        )?;
        Ok(Arc::new(classifier))
    }

    fn load_transcription_engine(&self) -> Result<Arc<dyn TranscriptionEngine>, ModelLoadError> {
        let model_id = resolve_whisper_model_id(&self.config.whisper_model);
        let engine = CandleWhisperEngine::new(&model_id, self.device.clone()).map_err(
            |e| match e {
                TranscriptionError::ModelLoadFailed(msg) => ModelLoadError::LoadFailed(msg),
                other => ModelLoadError::LoadFailed(other.to_string()),
            },
        )?;
        Ok(Arc::new(engine))
    }

    fn device_name(&self) -> String {
        device_label(&self.device).to_string()
    }
}
