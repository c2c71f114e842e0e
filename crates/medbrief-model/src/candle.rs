use std::sync::{Arc, Mutex};

use candle_core::{DType, Device, IndexOp, Tensor};
use candle_transformers::models::t5;
use tokenizers::Tokenizer;

use crate::error::ModelError;
use crate::generate::{self, GenerationConfig};
use crate::loader::{LoadedModel, ModelSource, load_summarization_model};
use crate::summarizer::Summarizer;

#[derive(Clone)]
pub struct CandleSummarizer {
    // std::sync::Mutex serializes generation; one CLI invocation runs chunks
    // sequentially anyway.
    model: Arc<Mutex<t5::T5ForConditionalGeneration>>,
    tokenizer: Arc<Tokenizer>,
    generation: GenerationConfig,
    task_prefix: String,
    max_input_tokens: usize,
    decoder_start_token: u32,
    eos_token: u32,
    device: Device,
}

impl std::fmt::Debug for CandleSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandleSummarizer")
            .field("generation", &self.generation)
            .field("task_prefix", &self.task_prefix)
            .field("max_input_tokens", &self.max_input_tokens)
            .field("device", &format!("{:?}", self.device))
            .finish_non_exhaustive()
    }
}

impl CandleSummarizer {
    /// Load the model and tokenizer once; the value is meant to be
    /// constructed at process start and passed to every summarization call.
    ///
    /// # Errors
    ///
    /// Returns an error if model or tokenizer loading fails.
    pub fn new(
        source: &ModelSource,
        generation: GenerationConfig,
        task_prefix: impl Into<String>,
        max_input_tokens: usize,
        device: Device,
    ) -> Result<Self, ModelError> {
        let LoadedModel {
            model,
            tokenizer,
            config,
        } = load_summarization_model(source, &device)?;

        let decoder_start_token =
            token_id(config.decoder_start_token_id.unwrap_or(config.pad_token_id))?;
        let eos_token = token_id(config.eos_token_id)?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            tokenizer: Arc::new(tokenizer),
            generation,
            task_prefix: task_prefix.into(),
            max_input_tokens: max_input_tokens.max(1),
            decoder_start_token,
            eos_token,
            device,
        })
    }

    #[must_use]
    pub fn device_name(&self) -> &'static str {
        match &self.device {
            Device::Cpu => "cpu",
            Device::Cuda(_) => "cuda",
            Device::Metal(_) => "metal",
        }
    }

    fn summarize_sync(&self, text: &str) -> Result<String, ModelError> {
        let input = format!("{}{}", self.task_prefix, text);
        let encoding = self
            .tokenizer
            .encode(input.as_str(), true)
            .map_err(|e| ModelError::Inference(format!("tokenizer encode failed: {e}")))?;
        let mut input_ids: Vec<u32> = encoding.get_ids().to_vec();
        input_ids.truncate(self.max_input_tokens);
        if input_ids.is_empty() {
            return Err(ModelError::Inference("empty input after tokenization".into()));
        }

        let input_tensor = Tensor::new(input_ids.as_slice(), &self.device)?.unsqueeze(0)?;

        let mut model = self
            .model
            .lock()
            .map_err(|e| ModelError::Inference(format!("model lock poisoned: {e}")))?;
        let encoder_output = model.encode(&input_tensor)?;

        let device = self.device.clone();
        let mut step = |prefix: &[u32]| -> Result<Vec<f32>, ModelError> {
            let decoder_ids = Tensor::new(prefix, &device)?.unsqueeze(0)?;
            let logits = model.decode(&decoder_ids, &encoder_output)?;
            last_position_logits(&logits)
        };

        let output = generate::beam_search(
            &mut step,
            &self.generation,
            self.decoder_start_token,
            self.eos_token,
        )?;
        tracing::debug!(tokens = output.tokens.len(), score = output.score, "generated chunk summary");

        let summary = self
            .tokenizer
            .decode(&output.tokens, true)
            .map_err(|e| ModelError::Inference(format!("tokenizer decode failed: {e}")))?;
        Ok(summary.trim().to_owned())
    }
}

impl Summarizer for CandleSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, ModelError> {
        let provider = self.clone();
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || provider.summarize_sync(&text))
            .await
            .map_err(|e| ModelError::Inference(format!("summarization task failed: {e}")))?
    }

    fn name(&self) -> &'static str {
        "candle"
    }
}

fn token_id(id: usize) -> Result<u32, ModelError> {
    u32::try_from(id).map_err(|_| ModelError::ModelLoad(format!("token id {id} out of range")))
}

/// Reduce a `[1, seq_len, vocab]` decoder output to the final position's
/// logits. With the KV cache disabled the decoder projects every prefix
/// position; only the last row scores the next token.
fn last_position_logits(logits: &Tensor) -> Result<Vec<f32>, ModelError> {
    let seq_len = logits.dim(1)?;
    let last = logits.i((0, seq_len - 1))?.to_dtype(DType::F32)?;
    Ok(last.to_vec1::<f32>()?)
}
