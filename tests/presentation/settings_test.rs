use std::path::PathBuf;

use ielts_scoring::presentation::Settings;
use ielts_scoring::presentation::config::{ENABLE_WHISPER_VAR, MODEL_DIR_VAR};

#[test]
fn given_no_sources_when_loading_defaults_then_uses_builtin_values() {
    let settings = Settings::defaults().unwrap();

    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.models.writing_dir, "ielts-writing-v3-classification");
    assert_eq!(settings.models.speaking_dir, "speaking-cefr-roberta");
    assert_eq!(settings.models.writing_max_length, 512);
    assert_eq!(settings.models.speaking_max_length, 128);
    assert!(settings.transcription.enabled);
    assert_eq!(settings.transcription.whisper_model, "base");
    assert_eq!(settings.transcription.max_file_size_mb, 25);
    assert_eq!(settings.transcription.max_duration_secs, 300.0);
    assert_eq!(settings.inference.timeout().as_secs(), 120);
    assert!(!settings.logging.enable_json);
}

#[test]
fn given_legacy_variables_when_applying_overrides_then_replace_model_dir_and_whisper_flag() {
    let mut settings = Settings::defaults().unwrap();

    settings.apply_legacy_overrides(|key| match key {
        k if k == MODEL_DIR_VAR => Some("/srv/models".to_string()),
        k if k == ENABLE_WHISPER_VAR => Some("false".to_string()),
        _ => None,
    });

    assert_eq!(settings.models.root_dir, PathBuf::from("/srv/models"));
    assert!(!settings.transcription.enabled);
}

#[test]
fn given_unparseable_whisper_flag_when_applying_overrides_then_keeps_configured_value() {
    let mut settings = Settings::defaults().unwrap();

    settings.apply_legacy_overrides(|key| (key == ENABLE_WHISPER_VAR).then(|| "maybe".to_string()));

    assert!(settings.transcription.enabled);
}
