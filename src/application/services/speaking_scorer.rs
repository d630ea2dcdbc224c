use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    CefrLevel, CefrPrediction, ClassifierKind, FeedbackBundle, FeedbackDomain, argmax,
    feedback_for, softmax,
};

use super::model_registry::ModelRegistry;
use super::scoring_error::{ScoringError, classify_with_timeout, ensure_min_length};

#[derive(Debug, Clone)]
pub struct SpeakingAssessment {
    pub prediction: CefrPrediction,
    pub feedback: FeedbackBundle,
    pub probabilities: Option<Vec<(CefrLevel, f32)>>,
}

pub struct SpeakingScorer {
    registry: Arc<ModelRegistry>,
    inference_timeout: Duration,
}

impl SpeakingScorer {
    pub fn new(registry: Arc<ModelRegistry>, inference_timeout: Duration) -> Self {
        Self {
            registry,
            inference_timeout,
        }
    }

    async fn logits(&self, text: &str) -> Result<Vec<f32>, ScoringError> {
        ensure_min_length(text, ClassifierKind::Speaking)?;

        let classifier = self.registry.classifier(ClassifierKind::Speaking).await?;
        let logits =
            classify_with_timeout(classifier.as_ref(), text, self.inference_timeout).await?;

        if logits.len() != CefrLevel::ALL.len() || logits.iter().any(|l| !l.is_finite()) {
            return Err(ScoringError::InferenceFailure(format!(
                "speaking model produced unusable logits ({} values)",
                logits.len()
            )));
        }
        Ok(logits)
    }

    /// Argmax over the raw logits; no probability is attached.
    pub async fn score_transcript(&self, text: &str) -> Result<CefrPrediction, ScoringError> {
        let logits = self.logits(text).await?;
        let prediction = predict_level(&logits)?;

        tracing::info!(
            cefr = %prediction.level,
            band = prediction.approximate_band,
            "Transcript scored"
        );

        Ok(prediction)
    }

    /// Full softmax distribution over CEFR levels.
    pub async fn cefr_probabilities(
        &self,
        text: &str,
    ) -> Result<Vec<(CefrLevel, f32)>, ScoringError> {
        let logits = self.logits(text).await?;
        Ok(level_distribution(&logits))
    }

    /// Scores once and derives the prediction, feedback and (optionally) the
    /// distribution from the same logits.
    pub async fn assess(
        &self,
        text: &str,
        include_probabilities: bool,
    ) -> Result<SpeakingAssessment, ScoringError> {
        let logits = self.logits(text).await?;
        let prediction = predict_level(&logits)?;
        let feedback = feedback_for(FeedbackDomain::Speaking, prediction.approximate_band);
        let probabilities = include_probabilities.then(|| level_distribution(&logits));

        tracing::info!(
            cefr = %prediction.level,
            band = prediction.approximate_band,
            "Transcript scored"
        );

        Ok(SpeakingAssessment {
            prediction,
            feedback,
            probabilities,
        })
    }
}

fn predict_level(logits: &[f32]) -> Result<CefrPrediction, ScoringError> {
    argmax(logits)
        .and_then(CefrLevel::from_index)
        .map(CefrPrediction::new)
        .ok_or_else(|| ScoringError::InferenceFailure("no CEFR class predicted".to_string()))
}

fn level_distribution(logits: &[f32]) -> Vec<(CefrLevel, f32)> {
    CefrLevel::ALL.into_iter().zip(softmax(logits)).collect()
}
