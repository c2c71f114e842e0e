mod env;
mod types;


pub use types::*;

use std::path::Path;

use anyhow::{Context, bail};

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to the built-in defaults (the published tool constants)
    /// when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.chunking.chunk_size == 0 {
            bail!("chunking.chunk_size must be at least 1");
        }
        if self.chunking.stride == 0 {
            bail!("chunking.stride must be at least 1");
        }
        let g = &self.model.generation;
        if g.num_beams == 0 {
            bail!("model.generation.num_beams must be at least 1");
        }
        if g.max_length == 0 {
            bail!("model.generation.max_length must be at least 1");
        }
        if g.min_length > g.max_length {
            bail!(
                "model.generation.min_length ({}) exceeds max_length ({})",
                g.min_length,
                g.max_length
            );
        }
        if self.model.max_input_tokens == 0 {
            bail!("model.max_input_tokens must be at least 1");
        }
        match self.model.source.as_str() {
            "huggingface" => {}
            "local" => {
                if self.model.local_path.is_empty() {
                    bail!("model.local_path required when model.source is \"local\"");
                }
            }
            other => bail!("unknown model source: {other}"),
        }
        Ok(())
    }
}
