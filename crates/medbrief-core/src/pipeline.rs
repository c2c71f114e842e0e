use std::path::Path;

use medbrief_document::{Chunk, DocumentError, TextSplitter, loader_for_path};
use medbrief_model::{ModelError, Summarizer};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] DocumentError),

    #[error("inference failed: {0}")]
    Inference(#[from] ModelError),

    #[error("document contains no extractable text")]
    EmptyDocument,
}

/// Linear report pipeline: extract, chunk, summarize per chunk, format.
///
/// The summarizer is constructed once at process start and threaded in; the
/// pipeline itself holds no model state.
pub struct Pipeline<S> {
    splitter: TextSplitter,
    summarizer: S,
    max_file_size: u64,
}

impl<S: Summarizer> Pipeline<S> {
    #[must_use]
    pub fn new(config: &Config, summarizer: S) -> Self {
        Self {
            splitter: TextSplitter::new((&config.chunking).into()),
            summarizer,
            max_file_size: config.limits.max_file_size,
        }
    }

    /// Run the full pipeline on one input file and return the formatted
    /// report.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Extraction`] when loading or parsing the
    /// input fails, [`PipelineError::EmptyDocument`] when extraction yields
    /// no text, and [`PipelineError::Inference`] when a chunk summary fails.
    pub async fn run(&self, path: &Path) -> Result<String, PipelineError> {
        let loader = loader_for_path(path, self.max_file_size)?;
        let document = loader.load(path).await?;
        if document.content.trim().is_empty() {
            return Err(PipelineError::EmptyDocument);
        }

        let chunks = self.splitter.split(&document);
        tracing::info!(
            chunks = chunks.len(),
            source = %document.metadata.source,
            summarizer = self.summarizer.name(),
            "summarizing document"
        );

        let combined = self.summarize_chunks(&chunks).await?;
        Ok(medbrief_report::format_report(&combined))
    }

    /// Summarize each chunk in order and join the results with one space.
    async fn summarize_chunks(&self, chunks: &[Chunk]) -> Result<String, ModelError> {
        let mut summaries = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            tracing::info!(
                chunk = chunk.chunk_index,
                chars = chunk.content.chars().count(),
                "summarizing chunk"
            );
            summaries.push(self.summarizer.summarize(&chunk.content).await?);
        }
        Ok(summaries.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medbrief_model::mock::MockSummarizer;

    fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn text_file_produces_three_section_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "report.txt", "The scan shows mild changes.");

        let pipeline = Pipeline::new(
            &Config::default(),
            MockSummarizer::with_default_response("The scan looks mostly normal."),
        );
        let report = pipeline.run(&path).await.unwrap();

        assert!(report.contains("## Introduction"));
        assert!(report.contains("## Key Findings"));
        assert!(report.contains("## Recommendations"));
        assert!(report.contains("The scan looks mostly normal."));
    }

    #[tokio::test]
    async fn chunk_summaries_joined_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "report.txt", &"x".repeat(30));

        let mut config = Config::default();
        config.chunking.chunk_size = 16;
        config.chunking.stride = 16;

        let pipeline = Pipeline::new(
            &config,
            MockSummarizer::with_responses(vec!["first part".into(), "second part".into()]),
        );
        let report = pipeline.run(&path).await.unwrap();
        assert!(report.contains("first part second part"));
    }

    #[tokio::test]
    async fn empty_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "empty.txt", "");

        let pipeline = Pipeline::new(&Config::default(), MockSummarizer::default());
        let result = pipeline.run(&path).await;
        assert!(matches!(result, Err(PipelineError::EmptyDocument)));
    }

    #[tokio::test]
    async fn whitespace_only_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "blank.txt", " \n\t \n");

        let pipeline = Pipeline::new(&Config::default(), MockSummarizer::default());
        let result = pipeline.run(&path).await;
        assert!(matches!(result, Err(PipelineError::EmptyDocument)));
    }

    #[tokio::test]
    async fn inference_failure_tagged_distinctly() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "report.txt", "content to summarize");

        let pipeline = Pipeline::new(&Config::default(), MockSummarizer::failing());
        let result = pipeline.run(&path).await;
        assert!(matches!(result, Err(PipelineError::Inference(_))));
    }

    #[tokio::test]
    async fn malformed_pdf_tagged_as_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "broken.pdf", "not a pdf");

        let pipeline = Pipeline::new(&Config::default(), MockSummarizer::default());
        let result = pipeline.run(&path).await;
        assert!(matches!(
            result,
            Err(PipelineError::Extraction(DocumentError::Pdf(_)))
        ));
    }

    #[tokio::test]
    async fn unsupported_extension_tagged_as_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "scan.png", "binary");

        let pipeline = Pipeline::new(&Config::default(), MockSummarizer::default());
        let result = pipeline.run(&path).await;
        assert!(matches!(
            result,
            Err(PipelineError::Extraction(DocumentError::UnsupportedFormat(_)))
        ));
    }

    #[tokio::test]
    async fn missing_file_tagged_as_extraction() {
        let pipeline = Pipeline::new(&Config::default(), MockSummarizer::default());
        let result = pipeline.run(Path::new("/nonexistent/report.pdf")).await;
        assert!(matches!(
            result,
            Err(PipelineError::Extraction(DocumentError::Io(_)))
        ));
    }
}
