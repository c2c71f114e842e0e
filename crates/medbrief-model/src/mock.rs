//! Test-only mock summarizer.

use std::sync::{Arc, Mutex};

use crate::error::ModelError;
use crate::summarizer::Summarizer;

#[derive(Debug, Clone)]
pub struct MockSummarizer {
    responses: Arc<Mutex<Vec<String>>>,
    pub default_response: String,
    pub fail: bool,
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock summary".into(),
            fail: false,
        }
    }
}

impl MockSummarizer {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_default_response(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Summarizer for MockSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, ModelError> {
        if self.fail {
            return Err(ModelError::Inference("mock inference error".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
