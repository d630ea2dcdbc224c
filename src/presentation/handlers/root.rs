use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "IELTS Scoring API is running",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: BTreeMap::from([
            ("health", "GET /health"),
            ("writing", "POST /api/writing/score"),
            ("speaking_text", "POST /api/speaking/score-text"),
            ("speaking_audio", "POST /api/speaking/score-audio"),
            ("transcribe", "POST /api/transcribe"),
        ]),
    })
}
