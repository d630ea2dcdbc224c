use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub models: ModelSettings,
    pub transcription: TranscriptionSettings,
    pub inference: InferenceSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    pub root_dir: PathBuf,
    pub writing_dir: String,
    pub speaking_dir: String,
    pub writing_max_length: usize,
    pub speaking_max_length: usize,
    pub use_gpu: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub enabled: bool,
    pub whisper_model: String,
    pub max_file_size_mb: usize,
    pub max_duration_secs: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSettings {
    pub timeout_secs: u64,
}

impl InferenceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

/// Standalone variables predating the `APP_` scheme.
pub const MODEL_DIR_VAR: &str = "MODEL_DIR";
pub const ENABLE_WHISPER_VAR: &str = "ENABLE_WHISPER";

impl Settings {
    /// Defaults, then `appsettings.{env}`, then `APP_*` variables, then the
    /// legacy `MODEL_DIR` and `ENABLE_WHISPER` overrides.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let mut settings: Settings = Self::builder()?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.apply_legacy_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Built-in defaults only. Used by tests and as the base layer of `load`.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000_i64)?
            .set_default("models.root_dir", ".")?
            .set_default("models.writing_dir", "ielts-writing-v3-classification")?
            .set_default("models.speaking_dir", "speaking-cefr-roberta")?
            .set_default("models.writing_max_length", 512_i64)?
            .set_default("models.speaking_max_length", 128_i64)?
            .set_default("models.use_gpu", true)?
            .set_default("transcription.enabled", true)?
            .set_default("transcription.whisper_model", "base")?
            .set_default("transcription.max_file_size_mb", 25_i64)?
            .set_default("transcription.max_duration_secs", 300.0_f64)?
            .set_default("inference.timeout_secs", 120_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)
    }

    pub fn apply_legacy_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(MODEL_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            self.models.root_dir = PathBuf::from(dir.trim());
        }
        if let Some(flag) = lookup(ENABLE_WHISPER_VAR).and_then(|v| parse_flag(&v)) {
            self.transcription.enabled = flag;
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
