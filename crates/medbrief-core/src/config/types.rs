use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use medbrief_document::{DEFAULT_MAX_FILE_SIZE, SplitterConfig};
use medbrief_model::{GenerationConfig, ModelSource};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ModelConfig {
    /// "huggingface" or "local".
    #[serde(default = "default_model_source")]
    pub source: String,
    #[serde(default = "default_repo_id")]
    pub repo_id: String,
    #[serde(default = "default_revision")]
    pub revision: String,
    #[serde(default)]
    pub local_path: String,
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default = "default_task_prefix")]
    pub task_prefix: String,
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,
    #[serde(default)]
    pub generation: GenerationParams,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            source: default_model_source(),
            repo_id: default_repo_id(),
            revision: default_revision(),
            local_path: String::new(),
            device: default_device(),
            task_prefix: default_task_prefix(),
            max_input_tokens: default_max_input_tokens(),
            generation: GenerationParams::default(),
        }
    }
}

impl ModelConfig {
    #[must_use]
    pub fn model_source(&self) -> ModelSource {
        match self.source.as_str() {
            "local" => ModelSource::Local {
                path: PathBuf::from(&self.local_path),
            },
            _ => ModelSource::HuggingFace {
                repo_id: self.repo_id.clone(),
                revision: self.revision.clone(),
            },
        }
    }
}

fn default_model_source() -> String {
    "huggingface".into()
}

fn default_repo_id() -> String {
    "Falconsai/text_summarization".into()
}

fn default_revision() -> String {
    "main".into()
}

fn default_device() -> String {
    "cpu".into()
}

fn default_task_prefix() -> String {
    "summarize: ".into()
}

fn default_max_input_tokens() -> usize {
    1024
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GenerationParams {
    #[serde(default = "default_num_beams")]
    pub num_beams: usize,
    #[serde(default = "default_length_penalty")]
    pub length_penalty: f64,
    #[serde(default = "default_early_stopping")]
    pub early_stopping: bool,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            num_beams: default_num_beams(),
            length_penalty: default_length_penalty(),
            early_stopping: default_early_stopping(),
            min_length: default_min_length(),
            max_length: default_max_length(),
        }
    }
}

impl From<&GenerationParams> for GenerationConfig {
    fn from(params: &GenerationParams) -> Self {
        Self {
            num_beams: params.num_beams,
            length_penalty: params.length_penalty,
            early_stopping: params.early_stopping,
            min_length: params.min_length,
            max_length: params.max_length,
        }
    }
}

fn default_num_beams() -> usize {
    4
}

fn default_length_penalty() -> f64 {
    2.0
}

fn default_early_stopping() -> bool {
    true
}

fn default_min_length() -> usize {
    300
}

fn default_max_length() -> usize {
    700
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChunkingConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_stride")]
    pub stride: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            stride: default_stride(),
        }
    }
}

impl From<&ChunkingConfig> for SplitterConfig {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            stride: config.stride,
        }
    }
}

fn default_chunk_size() -> usize {
    1024
}

fn default_stride() -> usize {
    800
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}
