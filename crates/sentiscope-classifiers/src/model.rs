//! Pre-trained RoBERTa-family sequence classifiers from the Hugging Face Hub
//!
//! Downloads `config.json`, `tokenizer.json` and `model.safetensors`, maps
//! the weights with Candle and returns the softmax distribution over the
//! model's `id2label` labels. Inference runs on the blocking thread pool.

use crate::classifier::Classifier;
use crate::config::{DeviceSpec, ModelSpec};
use crate::loader::ClassifierLoader;
use async_trait::async_trait;
use candle_core::{DType, Device, Tensor, D};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{
    Config as RobertaConfig, XLMRobertaForSequenceClassification,
};
use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};
use sentiscope_core::{Error, LabelScore, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokenizers::{Tokenizer, TruncationDirection};
use tracing::{debug, info};

/// Loads a [`RobertaSequenceClassifier`] described by a [`ModelSpec`]
pub struct HubLoader {
    spec: ModelSpec,
}

impl HubLoader {
    pub fn new(spec: ModelSpec) -> Self {
        Self { spec }
    }
}

#[async_trait]
impl ClassifierLoader for HubLoader {
    async fn load(&self) -> Result<Arc<dyn Classifier>> {
        let spec = self.spec.clone();
        let model = tokio::task::spawn_blocking(move || SequenceModel::load(&spec))
            .await
            .map_err(|e| Error::internal(format!("model loading task failed: {e}")))??;

        Ok(Arc::new(RobertaSequenceClassifier {
            name: self.spec.repo_id.clone(),
            model: Arc::new(model),
        }))
    }

    fn model_id(&self) -> &str {
        &self.spec.repo_id
    }
}

/// Sequence classifier backed by a loaded model
pub struct RobertaSequenceClassifier {
    name: String,
    model: Arc<SequenceModel>,
}

#[async_trait]
impl Classifier for RobertaSequenceClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        let model = Arc::clone(&self.model);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || model.predict(&text))
            .await
            .map_err(|e| Error::classifier(format!("inference task failed: {e}")))?
    }

    fn name(&self) -> &str {
        &self.name
    }
}

struct SequenceModel {
    tokenizer: Tokenizer,
    model: XLMRobertaForSequenceClassification,
    device: Device,
    labels: Vec<String>,
    max_length: usize,
}

struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

#[derive(Deserialize)]
struct LabelConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

impl SequenceModel {
    fn load(spec: &ModelSpec) -> Result<Self> {
        let start = Instant::now();
        let files = fetch(spec)?;

        let raw_config = std::fs::read_to_string(&files.config).context("Failed to read config")?;
        let config: RobertaConfig =
            serde_json::from_str(&raw_config).context("Failed to parse model config")?;
        let label_config: LabelConfig =
            serde_json::from_str(&raw_config).context("Failed to parse label config")?;
        let labels = ordered_labels(label_config.id2label)?;

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| Error::classifier(format!("Failed to load tokenizer: {e}")))?;

        let device = device_for(spec.device)?;
        let vb = var_builder(&files.weights, &device)?;
        let model = XLMRobertaForSequenceClassification::new(labels.len(), &config, vb)
            .context("Failed to build sequence classifier")?;

        info!(
            model = %spec.repo_id,
            labels = ?labels,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded sequence classifier"
        );

        Ok(Self {
            tokenizer,
            model,
            device,
            labels,
            max_length: spec.max_length,
        })
    }

    fn predict(&self, text: &str) -> Result<Vec<LabelScore>> {
        let mut encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::classifier(format!("Tokenization failed: {e}")))?;
        encoding.truncate(self.max_length, 0, TruncationDirection::Right);

        let input_ids = self.row(encoding.get_ids())?;
        let attention_mask = self.row(encoding.get_attention_mask())?;
        let token_type_ids = self.row(encoding.get_type_ids())?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)
            .context("Model forward pass failed")?;
        let probabilities: Vec<f32> = candle_nn::ops::softmax(&logits, D::Minus1)
            .context("Softmax failed")?
            .squeeze(0)
            .context("Squeeze failed")?
            .to_vec1()
            .context("Failed to read probabilities")?;

        debug!(tokens = encoding.get_ids().len(), "ran sequence classifier");

        Ok(self
            .labels
            .iter()
            .zip(probabilities)
            .map(|(label, score)| LabelScore::new(label.clone(), score))
            .collect())
    }

    /// Batch-of-one tensor from token-level values
    fn row(&self, values: &[u32]) -> Result<Tensor> {
        Tensor::new(values, &self.device)
            .context("Failed to create input tensor")?
            .unsqueeze(0)
            .context("Failed to unsqueeze input tensor")
    }
}

fn fetch(spec: &ModelSpec) -> Result<ModelFiles> {
    let api = ApiBuilder::new()
        .with_cache_dir(spec.cache_dir())
        .build()
        .context("Failed to initialize Hugging Face API")?;
    let repo = api.repo(Repo::with_revision(
        spec.repo_id.clone(),
        RepoType::Model,
        spec.revision.clone(),
    ));

    info!(model = %spec.repo_id, revision = %spec.revision, "fetching model files");
    let get = |file: &str| {
        repo.get(file)
            .context(&format!("Failed to download {file} from {}", spec.repo_id))
    };

    Ok(ModelFiles {
        config: get("config.json")?,
        tokenizer: get("tokenizer.json")?,
        weights: get("model.safetensors")?,
    })
}

fn device_for(spec: DeviceSpec) -> Result<Device> {
    match spec {
        DeviceSpec::Cpu => Ok(Device::Cpu),
        DeviceSpec::Cuda => Device::new_cuda(0).context("Failed to initialize CUDA"),
        DeviceSpec::Metal => Device::new_metal(0).context("Failed to initialize Metal"),
    }
}

fn var_builder(weights: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    // SAFETY: the weights file lives in the model cache and is not modified
    // while mapped.
    unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device) }
        .context("Failed to load weights")
}

/// Labels ordered by class index
fn ordered_labels(id2label: HashMap<String, String>) -> Result<Vec<String>> {
    if id2label.is_empty() {
        return Err(Error::classifier("model config has no id2label mapping"));
    }

    let mut indexed = id2label
        .into_iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|idx| (idx, label))
                .context(&format!("invalid label index '{id}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    indexed.sort_by_key(|(idx, _)| *idx);

    if indexed.iter().enumerate().any(|(pos, (idx, _))| pos != *idx) {
        return Err(Error::classifier("id2label indices are not contiguous"));
    }

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

trait Context<T> {
    fn context(self, what: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, what: &str) -> Result<T> {
        self.map_err(|e| Error::classifier(format!("{what}: {e}")))
    }
}
