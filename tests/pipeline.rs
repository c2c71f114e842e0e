use medbrief_core::{Config, Pipeline, PipelineError};
use medbrief_model::mock::MockSummarizer;

fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn full_pipeline_renders_sections_from_chunk_summaries() {
    // 2000 characters with the default 1024/800 window: chunks at 0, 800,
    // and 1600, so three inference calls in order.
    let dir = tempfile::tempdir().unwrap();
    let text = "The patient presented with chest pain. ".repeat(52);
    let path = write_input(&dir, "report.txt", &text[..2000]);

    let first = "The patient came in with chest pain and was examined. ".repeat(6);
    let summaries = vec![
        first,
        "Tests found no heart damage. Blood work was normal. ".repeat(6),
        "Rest is advised. A follow-up visit is planned".into(),
    ];
    let pipeline = Pipeline::new(&Config::default(), MockSummarizer::with_responses(summaries));

    let report = pipeline.run(&path).await.unwrap();

    assert!(report.starts_with("--- Medical Report ---"));
    let intro = report.find("## Introduction").unwrap();
    let findings = report.find("## Key Findings").unwrap();
    let recommendations = report.find("## Recommendations").unwrap();
    assert!(intro < findings && findings < recommendations);

    // First chunk summary lands at the front of the combined text.
    assert!(report.contains("The patient came in with chest pain"));
    // List sections carry at most five items.
    assert!(report.lines().filter(|l| l.starts_with("- ")).count() <= 5);
    assert!(
        report
            .lines()
            .filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .count()
            <= 5
    );
}

#[tokio::test]
async fn short_document_yields_intro_only_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(&dir, "note.txt", "Minor finding.");

    let pipeline = Pipeline::new(
        &Config::default(),
        MockSummarizer::with_default_response("A. B. C."),
    );
    let report = pipeline.run(&path).await.unwrap();

    assert!(report.contains("A. B. C...."));
    assert!(report.contains("## Key Findings"));
    assert!(report.contains("## Recommendations"));
    assert_eq!(report.lines().filter(|l| l.starts_with("- ")).count(), 0);
}

#[tokio::test]
async fn inference_failure_stops_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(&dir, "report.txt", "content worth summarizing");

    let pipeline = Pipeline::new(&Config::default(), MockSummarizer::failing());
    let result = pipeline.run(&path).await;
    assert!(matches!(result, Err(PipelineError::Inference(_))));
}

#[tokio::test]
async fn broken_pdf_reports_extraction_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(&dir, "scan.pdf", "definitely not a pdf");

    let pipeline = Pipeline::new(&Config::default(), MockSummarizer::default());
    let result = pipeline.run(&path).await;
    assert!(matches!(result, Err(PipelineError::Extraction(_))));
}

#[tokio::test]
async fn empty_document_is_rejected_before_inference() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(&dir, "empty.txt", "");

    let pipeline = Pipeline::new(&Config::default(), MockSummarizer::default());
    let result = pipeline.run(&path).await;
    assert!(matches!(result, Err(PipelineError::EmptyDocument)));
}
