use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use serde::{Deserialize, Serialize};

use crate::application::services::{ScoringError, SpeakingAssessment, TranscribeOptions};
use crate::domain::{ClassifierKind, TranscriptionTask};
use crate::infrastructure::observability::sanitize_text;
use crate::presentation::state::AppState;

use super::audio_upload::read_audio_field;
use super::error::ApiError;
use super::payloads::{FeedbackResponse, default_language, feedback_response, parse_language};

pub const UNINTELLIGIBLE_AUDIO: &str =
    "Could not extract meaningful text from audio. Please ensure clear speech.";

#[derive(Debug, Deserialize)]
pub struct SpeakingTextRequest {
    pub answer_text: String,
    #[serde(default)]
    pub include_probabilities: bool,
}

#[derive(Debug, Serialize)]
pub struct SpeakingTextResponse {
    pub cefr_level: &'static str,
    pub approx_ielts_band: f32,
    pub feedback: FeedbackResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cefr_probabilities: Option<BTreeMap<&'static str, f32>>,
}

impl From<SpeakingAssessment> for SpeakingTextResponse {
    fn from(assessment: SpeakingAssessment) -> Self {
        Self {
            cefr_level: assessment.prediction.level.as_str(),
            approx_ielts_band: assessment.prediction.approximate_band,
            feedback: feedback_response(&assessment.feedback),
            cefr_probabilities: assessment.probabilities.map(|probabilities| {
                probabilities
                    .into_iter()
                    .map(|(level, probability)| (level.as_str(), probability))
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreAudioQuery {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub include_segments: bool,
}

#[derive(Debug, Serialize)]
pub struct TranscriptInfo {
    pub language: String,
    pub duration_seconds: f32,
    pub word_count: usize,
    pub confidence: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct SpeakingAudioResponse {
    pub transcript: String,
    pub transcript_info: TranscriptInfo,
    pub cefr_level: &'static str,
    pub approx_ielts_band: f32,
    pub feedback: FeedbackResponse,
}

#[tracing::instrument(skip(state, payload))]
pub async fn score_speaking_text_handler(
    State(state): State<AppState>,
    payload: Result<Json<SpeakingTextRequest>, JsonRejection>,
) -> Result<Json<SpeakingTextResponse>, ApiError> {
    let Json(request) = payload?;

    tracing::debug!(
        answer = %sanitize_text(&request.answer_text),
        include_probabilities = request.include_probabilities,
        "Scoring speaking answer"
    );

    let assessment = state
        .speaking_scorer
        .assess(&request.answer_text, request.include_probabilities)
        .await?;

    Ok(Json(assessment.into()))
}

#[tracing::instrument(skip(state, multipart))]
pub async fn score_speaking_audio_handler(
    State(state): State<AppState>,
    query: Result<Query<ScoreAudioQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SpeakingAudioResponse>, ApiError> {
    let Query(query) = query?;
    let upload = read_audio_field(multipart?).await?;

    if !state.registry.is_available(ClassifierKind::Speaking) {
        return Err(ScoringError::ModelUnavailable(
            "Speaking model not available".to_string(),
        )
        .into());
    }

    let options = TranscribeOptions {
        language: parse_language(&query.language),
        task: TranscriptionTask::Transcribe,
        include_segments: query.include_segments,
    };
    let transcription = state
        .transcription_service
        .transcribe(&upload.data, &upload.filename, options)
        .await?;

    let transcript = transcription.text.trim();
    if transcript.chars().count() < ClassifierKind::Speaking.min_text_chars() {
        return Err(ApiError::validation(UNINTELLIGIBLE_AUDIO));
    }

    tracing::debug!(transcript = %sanitize_text(transcript), "Scoring transcribed answer");

    let assessment = state.speaking_scorer.assess(transcript, false).await?;

    Ok(Json(SpeakingAudioResponse {
        transcript: transcript.to_string(),
        transcript_info: TranscriptInfo {
            language: transcription.detected_language.clone(),
            duration_seconds: transcription.duration_seconds,
            word_count: transcription.word_count(),
            confidence: transcription.confidence,
        },
        cefr_level: assessment.prediction.level.as_str(),
        approx_ielts_band: assessment.prediction.approximate_band,
        feedback: feedback_response(&assessment.feedback),
    }))
}
