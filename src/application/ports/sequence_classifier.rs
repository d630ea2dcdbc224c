use async_trait::async_trait;

/// Text classifier producing one logit per class.
#[async_trait]
pub trait SequenceClassifier: Send + Sync {
    fn num_labels(&self) -> usize;

    async fn classify(&self, text: &str) -> Result<Vec<f32>, InferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("tokenization failed: {0}")]
    Tokenization(String),
    #[error("forward pass failed: {0}")]
    Forward(String),
    #[error("inference task failed: {0}")]
    TaskFailed(String),
}
