use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use serde::{Deserialize, Serialize};

use crate::application::services::TranscribeOptions;
use crate::domain::TranscriptionTask;
use crate::presentation::state::AppState;

use super::audio_upload::read_audio_field;
use super::error::ApiError;
use super::payloads::{SegmentResponse, default_language, parse_language};

#[derive(Debug, Deserialize)]
pub struct TranscribeQuery {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub include_segments: bool,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
    pub language: String,
    pub duration_seconds: f32,
    pub word_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentResponse>>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    query: Result<Query<TranscribeQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let Query(query) = query?;
    let task = match query.task.as_deref() {
        Some(task) => task.parse::<TranscriptionTask>().map_err(ApiError::validation)?,
        None => TranscriptionTask::default(),
    };
    let upload = read_audio_field(multipart?).await?;

    let options = TranscribeOptions {
        language: parse_language(&query.language),
        task,
        include_segments: query.include_segments,
    };
    let result = state
        .transcription_service
        .transcribe(&upload.data, &upload.filename, options)
        .await?;

    let word_count = result.word_count();
    let segments = query.include_segments.then(|| {
        result
            .segments
            .into_iter()
            .map(|segment| SegmentResponse {
                start: segment.start,
                end: segment.end,
                text: segment.text,
            })
            .collect()
    });

    Ok(Json(TranscribeResponse {
        text: result.text,
        language: result.detected_language,
        duration_seconds: result.duration_seconds,
        word_count,
        confidence: result.confidence,
        segments,
    }))
}
