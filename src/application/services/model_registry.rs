use std::sync::{Arc, OnceLock};
use std::time::Instant;

use tokio::sync::Mutex;

use crate::application::ports::{
    ModelLoadError, ModelLoader, SequenceClassifier, TranscriptionEngine,
};
use crate::domain::ClassifierKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    NotLoaded,
    Loading,
    Ready,
    Failed,
    Disabled,
}

impl ModelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::NotLoaded => "not_loaded",
            ModelStatus::Loading => "loading",
            ModelStatus::Ready => "ready",
            ModelStatus::Failed => "failed",
            ModelStatus::Disabled => "disabled",
        }
    }
}

/// Load-once cell for a model handle. The async mutex serializes the first
/// load and holds the last load failure. Sticky slots return that failure
/// without reloading; the others retry and clear it on success.
struct ModelSlot<T: ?Sized> {
    name: &'static str,
    cache_failures: bool,
    ready: OnceLock<Arc<T>>,
    load_lock: Mutex<Option<ModelLoadError>>,
}

impl<T> ModelSlot<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn new(name: &'static str, cache_failures: bool) -> Self {
        Self {
            name,
            cache_failures,
            ready: OnceLock::new(),
            load_lock: Mutex::new(None),
        }
    }

    async fn get_or_load<F>(&self, load: F) -> Result<Arc<T>, ModelLoadError>
    where
        F: FnOnce() -> Result<Arc<T>, ModelLoadError> + Send + 'static,
    {
        if let Some(model) = self.ready.get() {
            return Ok(Arc::clone(model));
        }

        let mut failure = self.load_lock.lock().await;

        if let Some(model) = self.ready.get() {
            return Ok(Arc::clone(model));
        }
        if self.cache_failures {
            if let Some(err) = failure.as_ref() {
                return Err(err.clone());
            }
        }

        tracing::info!(model = self.name, "Loading model");
        let started = Instant::now();

        let result = match tokio::task::spawn_blocking(load).await {
            Ok(result) => result,
            Err(e) => Err(ModelLoadError::LoadFailed(format!("load task: {}", e))),
        };

        match result {
            Ok(model) => {
                tracing::info!(
                    model = self.name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Model loaded"
                );
                *failure = None;
                let model = self.ready.get_or_init(|| model);
                Ok(Arc::clone(model))
            }
            Err(err) => {
                tracing::error!(
                    model = self.name,
                    error = %err,
                    cached = self.cache_failures,
                    "Model load failed"
                );
                *failure = Some(err.clone());
                Err(err)
            }
        }
    }

    fn status(&self) -> ModelStatus {
        if self.ready.get().is_some() {
            return ModelStatus::Ready;
        }
        match self.load_lock.try_lock() {
            Ok(failure) if failure.is_some() => ModelStatus::Failed,
            Ok(_) => ModelStatus::NotLoaded,
            Err(_) => ModelStatus::Loading,
        }
    }
}

/// Process-wide cache of loaded models, built once at startup and shared
/// through the application state.
pub struct ModelRegistry {
    loader: Arc<dyn ModelLoader>,
    writing: ModelSlot<dyn SequenceClassifier>,
    speaking: ModelSlot<dyn SequenceClassifier>,
    transcription: ModelSlot<dyn TranscriptionEngine>,
    transcription_enabled: bool,
}

impl ModelRegistry {
    pub fn new(loader: Arc<dyn ModelLoader>, transcription_enabled: bool) -> Self {
        Self {
            loader,
            writing: ModelSlot::new("writing", true),
            speaking: ModelSlot::new("speaking", true),
            // ASR loads may be retried on the next request.
            transcription: ModelSlot::new("transcription", false),
            transcription_enabled,
        }
    }

    fn slot(&self, kind: ClassifierKind) -> &ModelSlot<dyn SequenceClassifier> {
        match kind {
            ClassifierKind::Writing => &self.writing,
            ClassifierKind::Speaking => &self.speaking,
        }
    }

    pub async fn classifier(
        &self,
        kind: ClassifierKind,
    ) -> Result<Arc<dyn SequenceClassifier>, ModelLoadError> {
        let loader = Arc::clone(&self.loader);
        self.slot(kind)
            .get_or_load(move || loader.load_classifier(kind))
            .await
    }

    pub async fn transcription_engine(
        &self,
    ) -> Result<Arc<dyn TranscriptionEngine>, ModelLoadError> {
        if !self.transcription_enabled {
            return Err(ModelLoadError::Disabled("speech-to-text"));
        }
        let loader = Arc::clone(&self.loader);
        self.transcription
            .get_or_load(move || loader.load_transcription_engine())
            .await
    }

    pub fn classifier_status(&self, kind: ClassifierKind) -> ModelStatus {
        self.slot(kind).status()
    }

    pub fn transcription_status(&self) -> ModelStatus {
        if !self.transcription_enabled {
            return ModelStatus::Disabled;
        }
        self.transcription.status()
    }

    /// A classifier counts as available once loaded, or while its artifacts
    /// are present and no load has failed.
    pub fn is_available(&self, kind: ClassifierKind) -> bool {
        match self.classifier_status(kind) {
            ModelStatus::Ready => true,
            ModelStatus::Failed | ModelStatus::Disabled => false,
            ModelStatus::NotLoaded | ModelStatus::Loading => self.loader.is_present(kind),
        }
    }

    pub fn transcription_enabled(&self) -> bool {
        self.transcription_enabled
    }

    /// Enabled and not in a failed state. A failed engine becomes available
    /// again once a retried load succeeds.
    pub fn transcription_available(&self) -> bool {
        !matches!(
            self.transcription_status(),
            ModelStatus::Disabled | ModelStatus::Failed
        )
    }

    pub fn device_name(&self) -> String {
        self.loader.device_name()
    }

    /// Startup preload. Only a writing model failure is returned; the other
    /// models degrade to unavailable.
    pub async fn preload(&self) -> Result<(), ModelLoadError> {
        self.classifier(ClassifierKind::Writing).await?;

        if self.loader.is_present(ClassifierKind::Speaking) {
            if let Err(e) = self.classifier(ClassifierKind::Speaking).await {
                tracing::warn!(error = %e, "Speaking model failed to load, speaking scoring disabled");
            }
        } else {
            tracing::warn!("Speaking model not found, speaking scoring unavailable");
        }

        if self.transcription_enabled {
            if let Err(e) = self.transcription_engine().await {
                tracing::warn!(error = %e, "Transcription engine failed to load, will retry on demand");
            }
        } else {
            tracing::info!("Transcription disabled by configuration");
        }

        Ok(())
    }
}
