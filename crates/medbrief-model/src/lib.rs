//! Summarization model boundary: weight loading, beam-search generation, and
//! the summarizer seam.

pub mod candle;
pub mod error;
pub mod generate;
pub mod loader;
#[cfg(feature = "mock")]
pub mod mock;
pub mod summarizer;

pub use candle_core::Device;

pub use candle::CandleSummarizer;
pub use error::ModelError;
pub use generate::{GenerationConfig, GenerationOutput};
pub use loader::ModelSource;
pub use summarizer::Summarizer;
