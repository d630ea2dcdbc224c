use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::infrastructure::observability::sanitize_text;
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::payloads::{FeedbackResponse, feedback_response};

#[derive(Debug, Deserialize)]
pub struct WritingRequest {
    /// Task prompt. Accepted for context and not used for scoring.
    #[serde(default)]
    pub prompt: Option<String>,
    pub essay: String,
}

#[derive(Debug, Serialize)]
pub struct BandProbability {
    pub band: f32,
    pub probability: f32,
}

#[derive(Debug, Serialize)]
pub struct WritingResponse {
    pub overall_band: f32,
    pub confidence: f32,
    pub top_predictions: Vec<BandProbability>,
    pub feedback: FeedbackResponse,
}

#[tracing::instrument(skip(state, payload))]
pub async fn score_writing_handler(
    State(state): State<AppState>,
    payload: Result<Json<WritingRequest>, JsonRejection>,
) -> Result<Json<WritingResponse>, ApiError> {
    let Json(request) = payload?;

    tracing::debug!(
        essay = %sanitize_text(&request.essay),
        has_prompt = request.prompt.is_some(),
        "Scoring essay"
    );

    let assessment = state.writing_scorer.assess(&request.essay).await?;
    let prediction = assessment.prediction;

    Ok(Json(WritingResponse {
        overall_band: prediction.band,
        confidence: prediction.confidence,
        top_predictions: prediction
            .top_predictions
            .iter()
            .map(|ranked| BandProbability {
                band: ranked.band,
                probability: ranked.probability,
            })
            .collect(),
        feedback: feedback_response(&assessment.feedback),
    }))
}
