use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use ielts_scoring::application::services::{AudioLimits, ModelRegistry};
use ielts_scoring::infrastructure::audio::SymphoniaAudioDecoder;
use ielts_scoring::infrastructure::models::{CandleModelConfig, CandleModelLoader};
use ielts_scoring::infrastructure::observability::{TracingConfig, init_tracing};
use ielts_scoring::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    let tracing_config = TracingConfig::new(
        environment.as_str(),
        Some(settings.logging.level.as_str()),
        settings.logging.enable_json || TracingConfig::default().json_format,
    );
    init_tracing(&tracing_config);

    let models = &settings.models;
    tracing::info!(
        model_dir = %models.root_dir.display(),
        transcription_enabled = settings.transcription.enabled,
        whisper_model = %settings.transcription.whisper_model,
        "Configuration loaded"
    );

    let loader = Arc::new(CandleModelLoader::new(CandleModelConfig {
        root_dir: models.root_dir.clone(),
        writing_dir: models.writing_dir.clone(),
        speaking_dir: models.speaking_dir.clone(),
        writing_max_length: models.writing_max_length,
        speaking_max_length: models.speaking_max_length,
        whisper_model: settings.transcription.whisper_model.clone(),
        use_gpu: models.use_gpu,
    }));

    let registry = Arc::new(ModelRegistry::new(
        loader,
        settings.transcription.enabled,
    ));
    registry
        .preload()
        .await
        .context("Failed to load the writing model")?;

    let state = AppState::new(
        Arc::clone(&registry),
        Arc::new(SymphoniaAudioDecoder),
        AudioLimits::new(
            settings.transcription.max_file_size_mb,
            settings.transcription.max_duration_secs,
        ),
        settings.inference.timeout(),
        settings.transcription.whisper_model.clone(),
    );

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(%addr, device = %registry.device_name(), "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
