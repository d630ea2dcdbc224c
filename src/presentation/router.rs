use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, root_handler, score_speaking_audio_handler, score_speaking_text_handler,
    score_writing_handler, transcribe_handler,
};
use crate::presentation::state::AppState;

/// Multipart framing on top of the audio payload itself.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Oversized uploads must reach validation so they are reported as "too large".
    let audio_body_limit =
        state.transcription_service.limits().max_file_size_bytes * 2 + MULTIPART_OVERHEAD_BYTES;

    let audio_routes = Router::new()
        .route(
            "/api/speaking/score-audio",
            post(score_speaking_audio_handler),
        )
        .route("/api/transcribe", post(transcribe_handler))
        .layer(DefaultBodyLimit::max(audio_body_limit));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/writing/score", post(score_writing_handler))
        .route(
            "/api/speaking/score-text",
            post(score_speaking_text_handler),
        )
        .merge(audio_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
