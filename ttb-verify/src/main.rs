//! ttb-verify - batch label verification
//!
//! Reads application records, verifies each record's label image and
//! prints one status line per label. The records file is never modified;
//! `--output` writes results to a separate JSON file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ttb_common::config::LoggingConfig;
use ttb_verify::config::{EngineKind, PipelineConfig, TomlConfig};
use ttb_verify::ocr::{OcrProvider, SerializedProvider, TesseractCliProvider, TranscriptProvider};
use ttb_verify::records::{load_records, RecordOutcome};
use ttb_verify::resolver::DirectoryImageResolver;
use ttb_verify::LabelPipeline;

/// Command-line arguments for ttb-verify
#[derive(Parser, Debug)]
#[command(name = "ttb-verify")]
#[command(about = "Verify alcohol label images against application records")]
#[command(version)]
struct Args {
    /// JSON array of application records
    #[arg(short, long, default_value = "data.json", env = "TTB_RECORDS")]
    records: PathBuf,

    /// Only process these application numbers (repeatable)
    #[arg(short = 'n', long = "app-num")]
    app_nums: Vec<String>,

    /// Label image directory, searched in order (repeatable; replaces config)
    #[arg(short = 'd', long = "label-dir")]
    label_dirs: Vec<PathBuf>,

    /// Write results as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (overrides TTB_CONFIG and the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::load(args.config.as_deref()).context("Failed to load config")?;
    init_tracing(&config.logging)?;

    info!("Starting ttb-verify");
    info!(
        "Version: {} (git {}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if !args.label_dirs.is_empty() {
        config.pipeline.label_dirs = args.label_dirs.clone();
    }

    let mut records = load_records(&args.records)
        .with_context(|| format!("Failed to load records from {}", args.records.display()))?;
    if !args.app_nums.is_empty() {
        records.retain(|r| args.app_nums.contains(&r.application_num));
    }
    info!(records = records.len(), path = %args.records.display(), "Records selected");

    let pipeline = build_pipeline(config);
    let results = pipeline.process_batch(records).await;

    for (app_num, result) in &results {
        println!("{}: {}", app_num, result.display_status());
    }

    if let Some(output) = &args.output {
        write_results(output, results)?;
        info!(path = %output.display(), "Results written");
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ttb_verify={0},ttb_common={0}", logging.level)));

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

fn build_provider(kind: &EngineKind, settings: &PipelineConfig) -> Arc<dyn OcrProvider> {
    match kind {
        // One tesseract process at a time; it already spreads across cores
        EngineKind::Tesseract => Arc::new(SerializedProvider::new(TesseractCliProvider::new(
            settings.tesseract_bin.clone(),
        ))),
        EngineKind::Transcript(suffix) => Arc::new(TranscriptProvider::new(suffix.clone())),
    }
}

fn build_pipeline(config: TomlConfig) -> LabelPipeline {
    let provider_a = build_provider(&config.pipeline.engine_a, &config.pipeline);
    let provider_b = build_provider(&config.pipeline.engine_b, &config.pipeline);
    let resolver = Arc::new(DirectoryImageResolver::new(config.pipeline.label_dirs.clone()));

    LabelPipeline::new(
        provider_a,
        provider_b,
        resolver,
        config.verification,
        config.pipeline,
    )
}

fn write_results(path: &Path, results: Vec<(String, ttb_verify::LabelResult)>) -> Result<()> {
    let outcomes: Vec<RecordOutcome> = results
        .into_iter()
        .map(|(app_num, result)| RecordOutcome::new(app_num, result))
        .collect();
    let json = serde_json::to_string_pretty(&outcomes).context("Failed to serialize results")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    Ok(())
}
