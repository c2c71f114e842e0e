//! Configuration and pipeline composition for medbrief.

pub mod config;
pub mod pipeline;

pub use config::Config;
pub use pipeline::{Pipeline, PipelineError};
