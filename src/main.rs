use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use medbrief_core::{Config, Pipeline};
use medbrief_model::{CandleSummarizer, Device};

#[derive(Debug, Parser)]
#[command(
    name = "medbrief",
    version,
    about = "Plain-language summaries of medical report PDFs"
)]
struct Cli {
    /// Medical report to summarize (PDF).
    input: PathBuf,

    /// Configuration file.
    #[arg(long, default_value = "medbrief.toml")]
    config: PathBuf,

    /// Model repo id or local checkpoint directory, overriding the
    /// configured one.
    #[arg(long)]
    model: Option<String>,

    /// Inference device.
    #[arg(long, value_parser = ["cpu", "cuda", "metal", "auto"])]
    device: Option<String>,

    /// Write the report to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;

    ensure_pdf(&cli.input)?;

    let device = select_device(&config.model.device)?;
    tracing::info!(model = %config.model.repo_id, device = %config.model.device, "loading summarization model");
    let summarizer = CandleSummarizer::new(
        &config.model.model_source(),
        (&config.model.generation).into(),
        config.model.task_prefix.clone(),
        config.model.max_input_tokens,
        device,
    )?;
    tracing::info!(device = summarizer.device_name(), "model ready");

    let pipeline = Pipeline::new(&config, summarizer);
    let report = pipeline.run(&cli.input).await?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &report)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{report}"),
    }

    Ok(())
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref model) = cli.model {
        if Path::new(model).is_dir() {
            config.model.source = "local".into();
            config.model.local_path = model.clone();
        } else {
            config.model.source = "huggingface".into();
            config.model.repo_id = model.clone();
        }
    }
    if let Some(ref device) = cli.device {
        config.model.device = device.clone();
    }
}

fn ensure_pdf(path: &Path) -> anyhow::Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext.eq_ignore_ascii_case("pdf") {
        Ok(())
    } else {
        anyhow::bail!("input must be a PDF file: {}", path.display())
    }
}

fn select_device(preference: &str) -> anyhow::Result<Device> {
    match preference {
        "metal" => {
            #[cfg(feature = "metal")]
            return Ok(Device::new_metal(0)?);
            #[cfg(not(feature = "metal"))]
            anyhow::bail!("medbrief compiled without metal feature");
        }
        "cuda" => {
            #[cfg(feature = "cuda")]
            return Ok(Device::new_cuda(0)?);
            #[cfg(not(feature = "cuda"))]
            anyhow::bail!("medbrief compiled without cuda feature");
        }
        "auto" => {
            #[cfg(feature = "metal")]
            if let Ok(device) = Device::new_metal(0) {
                return Ok(device);
            }
            #[cfg(feature = "cuda")]
            if let Ok(device) = Device::new_cuda(0) {
                return Ok(device);
            }
            Ok(Device::Cpu)
        }
        _ => Ok(Device::Cpu),
    }
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Logs go to stderr; stdout carries only the report.
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
