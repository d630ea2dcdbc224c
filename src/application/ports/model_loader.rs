use std::sync::Arc;

use crate::domain::ClassifierKind;

use super::{SequenceClassifier, TranscriptionEngine};

/// Blocking model construction. Called by the registry on the blocking pool.
pub trait ModelLoader: Send + Sync {
    /// Whether the on-disk artifacts for `kind` exist.
    fn is_present(&self, kind: ClassifierKind) -> bool;

    fn load_classifier(
        &self,
        kind: ClassifierKind,
    ) -> Result<Arc<dyn SequenceClassifier>, ModelLoadError>;

    fn load_transcription_engine(&self) -> Result<Arc<dyn TranscriptionEngine>, ModelLoadError>;

    /// Human-readable compute device, e.g. `cpu` or `cuda`.
    fn device_name(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model unavailable: {0}")]
    Unavailable(String),
    #[error("model loading failed: {0}")]
    LoadFailed(String),
    #[error("{0} is disabled")]
    Disabled(&'static str),
}
