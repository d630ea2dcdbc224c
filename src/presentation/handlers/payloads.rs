use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::FeedbackBundle;

/// Criterion name to feedback text.
pub type FeedbackResponse = BTreeMap<&'static str, &'static str>;

pub fn feedback_response(bundle: &FeedbackBundle) -> FeedbackResponse {
    bundle.iter().collect()
}

/// `language=auto` (or an empty value) asks the engine to detect the language.
pub fn parse_language(language: &str) -> Option<String> {
    let language = language.trim().to_lowercase();
    if language.is_empty() || language == "auto" {
        None
    } else {
        Some(language)
    }
}

pub fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub start: f32,
    pub end: f32,
    pub text: String,
}
