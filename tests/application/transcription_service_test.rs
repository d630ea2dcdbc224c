use std::sync::Arc;
use std::time::Duration;

use ielts_scoring::application::services::{
    AudioLimits, AudioValidationError, ModelRegistry, TranscribeOptions, TranscriptionService,
    TranscriptionServiceError,
};
use ielts_scoring::domain::TranscriptionTask;

use crate::helpers::mock_models::{MockDecoder, MockLoader};

const AUDIO: &[u8] = b"not really audio, the decoder is mocked";

fn service(
    loader: MockLoader,
    decoder: &Arc<MockDecoder>,
    enabled: bool,
) -> TranscriptionService {
    let registry = Arc::new(ModelRegistry::new(Arc::new(loader), enabled));
    TranscriptionService::new(
        registry,
        Arc::clone(decoder) as _,
        AudioLimits::default(),
        Duration::from_secs(5),
    )
}

fn validation_reason(result: Result<impl std::fmt::Debug, TranscriptionServiceError>) -> &'static str {
    match result {
        Err(TranscriptionServiceError::Validation(err)) => err.reason(),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn given_empty_payload_when_transcribing_then_rejects_as_empty() {
    let decoder = Arc::new(MockDecoder::with_duration(5.0));
    let service = service(MockLoader::all_models(), &decoder, true);

    let result = service
        .transcribe(&[], "answer.wav", TranscribeOptions::default())
        .await;

    assert_eq!(validation_reason(result), "empty");
    assert!(decoder.last_path().is_none());
}

#[tokio::test]
async fn given_unknown_extension_when_transcribing_then_rejects_as_unsupported_format() {
    let decoder = Arc::new(MockDecoder::with_duration(5.0));
    let service = service(MockLoader::all_models(), &decoder, true);

    let result = service
        .transcribe(AUDIO, "notes.xyz", TranscribeOptions::default())
        .await;

    assert_eq!(validation_reason(result), "unsupported format");
}

#[tokio::test]
async fn given_oversized_payload_when_transcribing_then_rejects_as_too_large() {
    let decoder = Arc::new(MockDecoder::with_duration(5.0));
    let service = service(MockLoader::all_models(), &decoder, true);
    let payload = vec![7u8; 26 * 1024 * 1024];

    let result = service
        .transcribe(&payload, "answer.mp3", TranscribeOptions::default())
        .await;

    assert_eq!(validation_reason(result), "too large");
    assert!(decoder.last_path().is_none());
}

#[tokio::test]
async fn given_long_audio_when_transcribing_then_rejects_as_too_long_and_removes_temp_file() {
    let decoder = Arc::new(MockDecoder::with_duration(310.0));
    let service = service(MockLoader::all_models(), &decoder, true);

    let result = service
        .transcribe(AUDIO, "answer.wav", TranscribeOptions::default())
        .await;

    assert_eq!(validation_reason(result), "too long");
    assert!(!decoder.last_path().unwrap().exists());
}

#[tokio::test]
async fn given_valid_audio_when_transcribing_then_returns_trimmed_text_and_removes_temp_file() {
    let decoder = Arc::new(MockDecoder::with_duration(12.0));
    let service = service(MockLoader::all_models(), &decoder, true);

    let result = service
        .transcribe(AUDIO, "Answer.MP3", TranscribeOptions::default())
        .await
        .unwrap();

    assert!(result.text.starts_with("I usually spend"));
    assert_eq!(result.text, result.text.trim());
    assert_eq!(result.detected_language, "en");
    assert!((result.duration_seconds - 12.0).abs() < 1e-3);
    assert_eq!(result.confidence, None);
    assert!(result.segments.is_empty());

    let staged = decoder.last_path().unwrap();
    assert_eq!(staged.extension().and_then(|e| e.to_str()), Some("mp3"));
    assert!(!staged.exists());
}

#[tokio::test]
async fn given_segments_requested_when_transcribing_then_returns_segments_and_confidence() {
    let decoder = Arc::new(MockDecoder::with_duration(20.0));
    let service = service(MockLoader::all_models(), &decoder, true);
    let options = TranscribeOptions {
        include_segments: true,
        ..TranscribeOptions::default()
    };

    let result = service.transcribe(AUDIO, "a.flac", options).await.unwrap();

    assert_eq!(result.segments.len(), 2);
    assert_eq!(result.segments[0].text, "part 0");
    let confidence = result.confidence.unwrap();
    assert!((confidence - 0.8).abs() < 1e-5);
}

#[tokio::test]
async fn given_auto_language_and_translate_when_transcribing_then_forwards_request_to_engine() {
    let decoder = Arc::new(MockDecoder::with_duration(3.0));
    let service = service(MockLoader::all_models(), &decoder, true);
    let options = TranscribeOptions {
        language: None,
        task: TranscriptionTask::Translate,
        include_segments: false,
    };

    let result = service.transcribe(AUDIO, "clip.ogg", options).await.unwrap();

    assert_eq!(result.detected_language, "vi");
}

#[tokio::test]
async fn given_undecodable_audio_when_transcribing_then_returns_failure_and_removes_temp_file() {
    let decoder = Arc::new(MockDecoder::failing());
    let service = service(MockLoader::all_models(), &decoder, true);

    let result = service
        .transcribe(AUDIO, "answer.webm", TranscribeOptions::default())
        .await;

    assert!(matches!(result, Err(TranscriptionServiceError::Failure(_))));
    assert!(!decoder.last_path().unwrap().exists());
}

#[tokio::test]
async fn given_transcription_disabled_when_transcribing_then_returns_disabled() {
    let decoder = Arc::new(MockDecoder::with_duration(5.0));
    let service = service(MockLoader::all_models(), &decoder, false);

    let result = service
        .transcribe(AUDIO, "answer.wav", TranscribeOptions::default())
        .await;

    assert!(matches!(result, Err(TranscriptionServiceError::Disabled)));
    assert!(!service.is_enabled());
    assert!(decoder.last_path().is_none());
}

#[tokio::test]
async fn given_engine_load_failure_when_transcribing_then_returns_model_unavailable() {
    let decoder = Arc::new(MockDecoder::with_duration(5.0));
    let loader = MockLoader::all_models();
    let loader = MockLoader {
        engine: None,
        ..loader
    };
    let service = service(loader, &decoder, true);

    let result = service
        .transcribe(AUDIO, "answer.wav", TranscribeOptions::default())
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionServiceError::ModelUnavailable(_))
    ));
}

#[test]
fn given_default_limits_when_inspected_then_match_upload_policy() {
    let limits = AudioLimits::default();

    assert_eq!(limits.max_file_size_mb(), 25);
    assert_eq!(limits.max_file_size_bytes, 25 * 1024 * 1024);
    assert_eq!(limits.max_duration_secs, 300.0);
}

#[test]
fn given_validation_errors_when_describing_then_messages_name_the_limit() {
    let err = AudioValidationError::TooLong {
        seconds: 310.0,
        max_seconds: 300.0,
    };

    assert!(err.to_string().contains("300"));
    assert_eq!(AudioValidationError::Empty.reason(), "empty");
}
