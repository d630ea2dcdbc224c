use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::services::ModelStatus;
use crate::domain::{AudioFormat, ClassifierKind};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub device: String,
    pub models: ModelAvailability,
    pub model_status: ModelLoadStatus,
    pub whisper_info: WhisperInfo,
}

#[derive(Serialize)]
pub struct ModelAvailability {
    pub writing: bool,
    pub speaking: bool,
    pub whisper: bool,
}

#[derive(Serialize)]
pub struct ModelLoadStatus {
    pub writing: &'static str,
    pub speaking: &'static str,
    pub whisper: &'static str,
}

#[derive(Serialize)]
pub struct WhisperInfo {
    pub enabled: bool,
    pub model: String,
    pub supported_formats: Vec<String>,
    pub max_file_size_mb: usize,
    pub max_duration_seconds: f32,
    pub model_loaded: bool,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = &state.registry;
    let transcription_status = registry.transcription_status();
    let limits = state.transcription_service.limits();

    Json(HealthResponse {
        status: "healthy",
        device: registry.device_name(),
        models: ModelAvailability {
            writing: registry.is_available(ClassifierKind::Writing),
            speaking: registry.is_available(ClassifierKind::Speaking),
            whisper: registry.transcription_available(),
        },
        model_status: ModelLoadStatus {
            writing: registry.classifier_status(ClassifierKind::Writing).as_str(),
            speaking: registry.classifier_status(ClassifierKind::Speaking).as_str(),
            whisper: transcription_status.as_str(),
        },
        whisper_info: WhisperInfo {
            enabled: registry.transcription_enabled(),
            model: state.whisper_model.clone(),
            supported_formats: AudioFormat::supported_extensions(),
            max_file_size_mb: limits.max_file_size_mb(),
            max_duration_seconds: limits.max_duration_secs,
            model_loaded: transcription_status == ModelStatus::Ready,
        },
    })
}
