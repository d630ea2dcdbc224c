use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    BandPrediction, ClassificationResult, ClassifierKind, FeedbackBundle, FeedbackDomain,
    feedback_for,
};

use super::model_registry::ModelRegistry;
use super::scoring_error::{ScoringError, classify_with_timeout, ensure_min_length};

#[derive(Debug, Clone)]
pub struct WritingAssessment {
    pub prediction: BandPrediction,
    pub feedback: FeedbackBundle,
}

pub struct WritingScorer {
    registry: Arc<ModelRegistry>,
    inference_timeout: Duration,
}

impl WritingScorer {
    pub fn new(registry: Arc<ModelRegistry>, inference_timeout: Duration) -> Self {
        Self {
            registry,
            inference_timeout,
        }
    }

    pub async fn score_essay(&self, essay: &str) -> Result<BandPrediction, ScoringError> {
        ensure_min_length(essay, ClassifierKind::Writing)?;

        let classifier = self.registry.classifier(ClassifierKind::Writing).await?;
        let logits =
            classify_with_timeout(classifier.as_ref(), essay, self.inference_timeout).await?;

        let result = ClassificationResult::from_logits(&logits).ok_or_else(|| {
            ScoringError::InferenceFailure("writing model produced non-finite logits".to_string())
        })?;

        let prediction = BandPrediction::from_classification(&result).ok_or_else(|| {
            ScoringError::InferenceFailure(format!(
                "writing model has {} classes, band table has {}",
                result.num_classes(),
                ClassifierKind::Writing.num_classes()
            ))
        })?;

        tracing::info!(
            band = prediction.band,
            confidence = prediction.confidence,
            "Essay scored"
        );

        Ok(prediction)
    }

    /// Band prediction plus the feedback bundle for the predicted band.
    pub async fn assess(&self, essay: &str) -> Result<WritingAssessment, ScoringError> {
        let prediction = self.score_essay(essay).await?;
        let feedback = feedback_for(FeedbackDomain::Writing, prediction.band);
        Ok(WritingAssessment {
            prediction,
            feedback,
        })
    }
}
