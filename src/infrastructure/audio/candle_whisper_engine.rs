use std::fmt::Display;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{
    EngineSegment, EngineTranscript, TranscriptionEngine, TranscriptionError, TranscriptionRequest,
};
use crate::domain::{SAMPLE_RATE, TranscriptionTask, softmax};

const MAX_DECODE_TOKENS: usize = 224;
/// English-only checkpoints use a 51864 token vocabulary.
const MULTILINGUAL_VOCAB_SIZE: usize = 51865;
const MEL_FILTER_REPO: &str = "FL33TW00D-HF/whisper-base";

/// Language codes that have a dedicated Whisper token.
const LANGUAGES: &[&str] = &[
    "en", "zh", "de", "es", "ru", "ko", "fr", "ja", "pt", "tr", "pl", "ca", "nl", "ar", "sv",
    "it", "id", "hi", "fi", "vi", "he", "uk", "el", "ms", "cs", "ro", "da", "hu", "ta", "no",
    "th", "ur", "hr", "bg", "lt", "la", "mi", "ml", "cy", "sk", "te", "fa", "lv", "bn", "sr",
    "az", "sl", "kn", "et", "mk", "br", "eu", "is", "hy", "ne", "mn", "bs", "kk", "sq", "sw",
    "gl", "mr", "pa", "si", "km", "sn", "yo", "so", "af", "oc", "ka", "be", "tg", "sd", "gu",
    "am", "yi", "lo", "uz", "fo", "ht", "ps", "tk", "nn", "mt", "sa", "lb", "my", "bo", "tl",
    "mg", "as", "tt", "haw", "ln", "ha", "ba", "jw", "su",
];

pub struct CandleWhisperEngine {
    runtime: Arc<WhisperRuntime>,
}

struct WhisperRuntime {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
    tokens: SpecialTokens,
    multilingual: bool,
}

struct SpecialTokens {
    sot: u32,
    transcribe: u32,
    translate: u32,
    no_timestamps: u32,
    eot: u32,
    no_speech: Option<u32>,
}

impl CandleWhisperEngine {
    /// Loads a Whisper checkpoint from the Hugging Face hub, e.g. `openai/whisper-base`.
    pub fn new(model_id: &str, device: Device) -> Result<Self, TranscriptionError> {
        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let mel_file = mel_filter_file(config.num_mel_bins);
        let mel_repo = api.repo(Repo::new(MEL_FILTER_REPO.to_string(), RepoType::Model));
        let mel_bytes_path = mel_repo
            .get(mel_file)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("{}: {}", mel_file, e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;
        let tokens = SpecialTokens::resolve(&tokenizer)?;
        let multilingual = config.vocab_size >= MULTILINGUAL_VOCAB_SIZE;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, config.num_mel_bins)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!(
            model = model_id,
            multilingual,
            mel_bins = config.num_mel_bins,
            "Candle Whisper engine loaded successfully"
        );

        Ok(Self {
            runtime: Arc::new(WhisperRuntime {
                model: Mutex::new(model),
                tokenizer,
                config,
                device,
                mel_filters,
                tokens,
                multilingual,
            }),
        })
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        pcm: Vec<f32>,
        request: TranscriptionRequest,
    ) -> Result<EngineTranscript, TranscriptionError> {
        let runtime = Arc::clone(&self.runtime);
        tokio::task::spawn_blocking(move || runtime.run(&pcm, &request))
            .await
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("task: {}", e)))?
    }
}

impl SpecialTokens {
    fn resolve(tokenizer: &Tokenizer) -> Result<Self, TranscriptionError> {
        Ok(Self {
            sot: token_id(tokenizer, m::SOT_TOKEN)?,
            transcribe: token_id(tokenizer, m::TRANSCRIBE_TOKEN)?,
            translate: token_id(tokenizer, m::TRANSLATE_TOKEN)?,
            no_timestamps: token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?,
            eot: token_id(tokenizer, m::EOT_TOKEN)?,
            no_speech: m::NO_SPEECH_TOKENS
                .iter()
                .find_map(|token| tokenizer.token_to_id(token)),
        })
    }
}

impl WhisperRuntime {
    fn run(
        &self,
        pcm: &[f32],
        request: &TranscriptionRequest,
    ) -> Result<EngineTranscript, TranscriptionError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| TranscriptionError::TranscriptionFailed("model lock poisoned".into()))?;

        let mut language = match request.language.as_deref() {
            Some(code) => language_token(&self.tokenizer, code, self.multilingual)?
                .map(|token| (code.to_string(), token)),
            None => None,
        };
        let mut segments = Vec::new();

        for (i, chunk) in pcm.chunks(m::N_SAMPLES).enumerate() {
            let mel = self.mel_tensor(chunk)?;
            let audio_features = model
                .encoder
                .forward(&mel, true)
                .map_err(failed("encoder"))?;

            if language.is_none() && self.multilingual {
                let detected = self.detect_language(&mut model, &audio_features)?;
                tracing::info!(language = %detected.0, "Detected spoken language");
                language = Some(detected);
            }

            let (text, no_speech_prob) = self.decode_segment(
                &mut model,
                &audio_features,
                language.as_ref().map(|(_, token)| *token),
                request.task,
            )?;

            let start = (i * m::N_SAMPLES) as f32 / SAMPLE_RATE as f32;
            let end = start + chunk.len() as f32 / SAMPLE_RATE as f32;
            tracing::debug!(segment = i, start, end, no_speech_prob, "Transcribed audio segment");

            segments.push(EngineSegment {
                start,
                end,
                text,
                no_speech_prob,
            });
        }

        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::info!(
            segments = segments.len(),
            chars = text.len(),
            "Audio transcription completed"
        );

        Ok(EngineTranscript {
            text,
            language: language
                .map(|(code, _)| code)
                .unwrap_or_else(|| "en".to_string()),
            segments,
        })
    }

    fn mel_tensor(&self, chunk: &[f32]) -> Result<Tensor, TranscriptionError> {
        let mut samples = chunk.to_vec();
        samples.resize(m::N_SAMPLES, 0.0);

        let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel_data.len() / n_mel;

        Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device).map_err(failed("mel tensor"))
    }

    fn detect_language(
        &self,
        model: &mut m::model::Whisper,
        audio_features: &Tensor,
    ) -> Result<(String, u32), TranscriptionError> {
        let logits = self.first_step_logits(model, audio_features, &[self.tokens.sot])?;
        model.reset_kv_cache();

        LANGUAGES
            .iter()
            .filter_map(|code| {
                let token = self.tokenizer.token_to_id(&format!("<|{}|>", code))?;
                let score = logits.get(token as usize).copied()?;
                Some((*code, token, score))
            })
            .max_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(code, token, _)| (code.to_string(), token))
            .ok_or_else(|| TranscriptionError::TranscriptionFailed("no language tokens".into()))
    }

    fn first_step_logits(
        &self,
        model: &mut m::model::Whisper,
        audio_features: &Tensor,
        tokens: &[u32],
    ) -> Result<Vec<f32>, TranscriptionError> {
        let token_tensor = Tensor::new(tokens, &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(failed("tokens"))?;
        let hidden = model
            .decoder
            .forward(&token_tensor, audio_features, true)
            .map_err(failed("decoder"))?;
        model
            .decoder
            .final_linear(&hidden.squeeze(0).map_err(failed("squeeze"))?)
            .and_then(|logits| logits.get(0))
            .and_then(|row| row.to_dtype(DType::F32))
            .and_then(|row| row.to_vec1::<f32>())
            .map_err(failed("linear"))
    }

    /// Greedy decode of one 30 second window. Returns the text and the no-speech probability.
    fn decode_segment(
        &self,
        model: &mut m::model::Whisper,
        audio_features: &Tensor,
        language_token: Option<u32>,
        task: TranscriptionTask,
    ) -> Result<(String, f32), TranscriptionError> {
        let mut tokens = vec![self.tokens.sot];
        if let Some(token) = language_token {
            tokens.push(token);
        }
        tokens.push(match task {
            TranscriptionTask::Transcribe => self.tokens.transcribe,
            TranscriptionTask::Translate => self.tokens.translate,
        });
        tokens.push(self.tokens.no_timestamps);
        let prompt_len = tokens.len();
        let max_len = self.config.max_target_positions;

        let mut no_speech_prob = 0.0;

        for step in 0..MAX_DECODE_TOKENS {
            let token_tensor = Tensor::new(tokens.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(failed("tokens"))?;

            let decoder_output = model
                .decoder
                .forward(&token_tensor, audio_features, step == 0)
                .map_err(failed("decoder"))?;

            let logits = model
                .decoder
                .final_linear(&decoder_output.squeeze(0).map_err(failed("squeeze"))?)
                .map_err(failed("linear"))?;

            if step == 0 {
                if let Some(no_speech) = self.tokens.no_speech {
                    let first: Vec<f32> = logits
                        .get(0)
                        .and_then(|row| row.to_dtype(DType::F32))
                        .and_then(|row| row.to_vec1())
                        .map_err(failed("no-speech logits"))?;
                    no_speech_prob = softmax(&first)
                        .get(no_speech as usize)
                        .copied()
                        .unwrap_or(0.0);
                }
            }

            let seq_len = logits.dim(0).map_err(failed("logits"))?;
            let next_token = logits
                .get(seq_len - 1)
                .and_then(|last| last.argmax(0))
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(failed("argmax"))?;

            if next_token == self.tokens.eot || tokens.len() >= max_len {
                break;
            }
            tokens.push(next_token);
        }

        model.reset_kv_cache();

        let text = self
            .tokenizer
            .decode(&tokens[prompt_len..], true)
            .map_err(failed("detokenize"))?;

        Ok((text.trim().to_string(), no_speech_prob))
    }
}

fn failed<E: Display>(context: &'static str) -> impl Fn(E) -> TranscriptionError {
    move |e| TranscriptionError::TranscriptionFailed(format!("{}: {}", context, e))
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

/// Resolves the prompt token for a language code. English-only checkpoints
/// have no language tokens and accept only `en`.
pub fn language_token(
    tokenizer: &Tokenizer,
    code: &str,
    multilingual: bool,
) -> Result<Option<u32>, TranscriptionError> {
    if !multilingual {
        return if code == "en" {
            Ok(None)
        } else {
            Err(TranscriptionError::UnsupportedLanguage(format!(
                "{} (model is English-only)",
                code
            )))
        };
    }
    if !LANGUAGES.contains(&code) {
        return Err(TranscriptionError::UnsupportedLanguage(code.to_string()));
    }
    token_id(tokenizer, &format!("<|{}|>", code)).map(Some)
}

pub fn mel_filter_file(num_mel_bins: usize) -> &'static str {
    match num_mel_bins {
        128 => "melfilters128.bytes",
        _ => "melfilters.bytes",
    }
}

/// Little-endian `f32` filter bank of `num_mel_bins x (N_FFT / 2 + 1)` values.
pub fn read_mel_filters(bytes: &[u8], num_mel_bins: usize) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
