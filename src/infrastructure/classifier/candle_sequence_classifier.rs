use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{
    Config as RobertaConfig, XLMRobertaForSequenceClassification,
};
use serde::Deserialize;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use crate::application::ports::{InferenceError, ModelLoadError, SequenceClassifier};
use crate::infrastructure::models::select_dtype;

pub const CONFIG_FILE: &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";

#[derive(Deserialize)]
struct LabelConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

/// RoBERTa sequence classifier loaded from a local fine-tuned checkpoint.
pub struct CandleSequenceClassifier {
    runtime: Arc<ClassifierRuntime>,
    num_labels: usize,
}

struct ClassifierRuntime {
    model: XLMRobertaForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
}

impl CandleSequenceClassifier {
    pub fn load(
        model_dir: &Path,
        max_length: usize,
        expected_labels: usize,
        device: Device,
    ) -> Result<Self, ModelLoadError> {
        tracing::info!(
            device = ?device,
            model_dir = %model_dir.display(),
            max_length,
            "Loading sequence classification model"
        );

        let config_contents = std::fs::read_to_string(model_dir.join(CONFIG_FILE))
            .map_err(|e| ModelLoadError::LoadFailed(format!("read config: {}", e)))?;
        let labels: LabelConfig = serde_json::from_str(&config_contents)
            .map_err(|e| ModelLoadError::LoadFailed(format!("parse labels: {}", e)))?;

        let num_labels = if labels.id2label.is_empty() {
            expected_labels
        } else {
            labels.id2label.len()
        };
        if num_labels != expected_labels {
            return Err(ModelLoadError::LoadFailed(format!(
                "expected {} labels, checkpoint declares {}",
                expected_labels, num_labels
            )));
        }

        let config: RobertaConfig = serde_json::from_str(&config_contents)
            .map_err(|e| ModelLoadError::LoadFailed(format!("parse config: {}", e)))?;

        let max_length = effective_max_length(max_length, config.max_position_embeddings);

        let mut tokenizer = Tokenizer::from_file(model_dir.join(TOKENIZER_FILE))
            .map_err(|e| ModelLoadError::LoadFailed(format!("tokenizer: {}", e)))?;
        configure_tokenizer(&mut tokenizer, max_length, config.pad_token_id as u32)?;

        let dtype = select_dtype(&device);

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[model_dir.join(WEIGHTS_FILE)], dtype, &device)
                .map_err(|e| ModelLoadError::LoadFailed(format!("weights: {}", e)))?
        };

        let model = XLMRobertaForSequenceClassification::new(num_labels, &config, vb)
            .map_err(|e| ModelLoadError::LoadFailed(format!("model: {}", e)))?;

        tracing::info!(num_labels, "Sequence classification model loaded successfully");

        Ok(Self {
            runtime: Arc::new(ClassifierRuntime {
                model,
                tokenizer,
                device,
            }),
            num_labels,
        })
    }
}

/// Caps the requested length to what the position embeddings allow. Two
/// positions are reserved by RoBERTa's position offset.
pub fn effective_max_length(requested: usize, max_position_embeddings: usize) -> usize {
    requested.min(max_position_embeddings.saturating_sub(2).max(1))
}

/// Every encoding comes out exactly `max_length` ids long: longer input is
/// truncated, shorter input is padded with `pad_id`.
pub fn configure_tokenizer(
    tokenizer: &mut Tokenizer,
    max_length: usize,
    pad_id: u32,
) -> Result<(), ModelLoadError> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| ModelLoadError::LoadFailed(format!("truncation config: {}", e)))?;

    let pad_token = tokenizer
        .id_to_token(pad_id)
        .unwrap_or_else(|| "<pad>".to_string());
    tokenizer.with_padding(Some(PaddingParams {
        strategy: PaddingStrategy::Fixed(max_length),
        pad_id,
        pad_token,
        ..Default::default()
    }));

    Ok(())
}

impl ClassifierRuntime {
    fn logits(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| InferenceError::Tokenization(e.to_string()))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| InferenceError::Forward(e.to_string()))?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| InferenceError::Forward(e.to_string()))?;
        let token_type_ids = input_ids
            .zeros_like()
            .map_err(|e| InferenceError::Forward(e.to_string()))?;

        self.model
            .forward(&input_ids, &attention_mask, &token_type_ids)
            .and_then(|t| t.to_dtype(DType::F32))
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| InferenceError::Forward(e.to_string()))
    }
}

#[async_trait]
impl SequenceClassifier for CandleSequenceClassifier {
    fn num_labels(&self) -> usize {
        self.num_labels
    }

    async fn classify(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        let runtime = Arc::clone(&self.runtime);
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || runtime.logits(&text))
            .await
            .map_err(|e| InferenceError::TaskFailed(e.to_string()))?
    }
}
