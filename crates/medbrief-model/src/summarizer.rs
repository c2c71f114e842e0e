use crate::error::ModelError;

pub trait Summarizer: Send + Sync {
    /// Produce a plain-language summary of one chunk of text.
    ///
    /// # Errors
    ///
    /// Returns an error if tokenization or generation fails.
    fn summarize(&self, text: &str) -> impl Future<Output = Result<String, ModelError>> + Send;

    fn name(&self) -> &'static str;
}
