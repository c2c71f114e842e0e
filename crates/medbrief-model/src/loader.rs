use std::path::{Path, PathBuf};

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::t5;
use tokenizers::Tokenizer;

use crate::error::ModelError;

#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Directory holding `config.json`, `tokenizer.json`, and
    /// `model.safetensors`.
    Local { path: PathBuf },
    HuggingFace { repo_id: String, revision: String },
}

pub struct LoadedModel {
    pub model: t5::T5ForConditionalGeneration,
    pub tokenizer: Tokenizer,
    pub config: t5::Config,
}

/// Load a T5-family summarization checkpoint from the specified source.
///
/// The decoder KV cache is disabled so generation decodes full prefixes
/// statelessly; beam candidates then share no cache state.
///
/// # Errors
///
/// Returns an error if downloading, config parsing, tokenizer
/// initialization, or weight loading fails.
pub fn load_summarization_model(
    source: &ModelSource,
    device: &Device,
) -> Result<LoadedModel, ModelError> {
    let (config_path, tokenizer_path, weights_path) = resolve_files(source)?;

    let config_str = std::fs::read_to_string(&config_path).map_err(|e| {
        ModelError::ModelLoad(format!(
            "failed to read {}: {e}",
            config_path.display()
        ))
    })?;
    let mut config: t5::Config = serde_json::from_str(&config_str)
        .map_err(|e| ModelError::ModelLoad(format!("failed to parse model config: {e}")))?;
    config.use_cache = false;

    let tokenizer = load_tokenizer(&tokenizer_path)?;

    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };
    let model = t5::T5ForConditionalGeneration::load(vb, &config)?;

    tracing::info!("summarization model loaded");

    Ok(LoadedModel {
        model,
        tokenizer,
        config,
    })
}

fn resolve_files(source: &ModelSource) -> Result<(PathBuf, PathBuf, PathBuf), ModelError> {
    match source {
        ModelSource::Local { path } => Ok((
            path.join("config.json"),
            path.join("tokenizer.json"),
            path.join("model.safetensors"),
        )),
        ModelSource::HuggingFace { repo_id, revision } => {
            let api = hf_hub::api::sync::Api::new().map_err(|e| {
                ModelError::ModelLoad(format!("failed to create HuggingFace API client: {e}"))
            })?;
            let repo = api.repo(hf_hub::Repo::with_revision(
                repo_id.clone(),
                hf_hub::RepoType::Model,
                revision.clone(),
            ));
            let fetch = |name: &str| {
                repo.get(name).map_err(|e| {
                    ModelError::ModelLoad(format!("failed to download {name} from {repo_id}: {e}"))
                })
            };
            Ok((
                fetch("config.json")?,
                fetch("tokenizer.json")?,
                fetch("model.safetensors")?,
            ))
        }
    }
}

fn load_tokenizer(path: &Path) -> Result<Tokenizer, ModelError> {
    Tokenizer::from_file(path).map_err(|e| {
        ModelError::ModelLoad(format!("failed to load tokenizer from {}: {e}", path.display()))
    })
}
