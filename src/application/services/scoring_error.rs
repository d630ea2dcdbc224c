use std::time::Duration;

use crate::application::ports::{InferenceError, ModelLoadError, SequenceClassifier};
use crate::domain::ClassifierKind;

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    ModelUnavailable(String),
    #[error("inference failed: {0}")]
    InferenceFailure(String),
    #[error("inference timed out after {0:?}")]
    Timeout(Duration),
}

impl From<ModelLoadError> for ScoringError {
    fn from(err: ModelLoadError) -> Self {
        ScoringError::ModelUnavailable(err.to_string())
    }
}

impl From<InferenceError> for ScoringError {
    fn from(err: InferenceError) -> Self {
        ScoringError::InferenceFailure(err.to_string())
    }
}

pub(crate) fn ensure_min_length(text: &str, kind: ClassifierKind) -> Result<(), ScoringError> {
    let min = kind.min_text_chars();
    let len = text.trim().chars().count();
    if len < min {
        return Err(ScoringError::Validation(format!(
            "{} text must be at least {} characters, got {}",
            kind, min, len
        )));
    }
    Ok(())
}

/// Runs one forward pass, discarding the result if it exceeds `limit`.
pub(crate) async fn classify_with_timeout(
    classifier: &dyn SequenceClassifier,
    text: &str,
    limit: Duration,
) -> Result<Vec<f32>, ScoringError> {
    let logits = tokio::time::timeout(limit, classifier.classify(text))
        .await
        .map_err(|_| ScoringError::Timeout(limit))??;

    if logits.len() != classifier.num_labels() {
        return Err(ScoringError::InferenceFailure(format!(
            "expected {} logits, got {}",
            classifier.num_labels(),
            logits.len()
        )));
    }

    Ok(logits)
}
