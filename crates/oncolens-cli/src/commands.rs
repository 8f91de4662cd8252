//! Subcommand handlers.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use oncolens_common::{PredictionReport, Record};
use oncolens_ingestion::{
    export_predictions, export_records, BatchOutcome, BatchRunner, BatchSummary, SAMPLE_BATCH_CSV,
};
use oncolens_ranker::{dataset_info, model_metrics, Scorer};

use crate::cli::{BatchArgs, PredictArgs};
use crate::config::{Config, OutputFormat};
use crate::render;

pub async fn predict(
    scorer: &Scorer,
    args: &PredictArgs,
    config: &Config,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let record = match &args.input {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Record::from_json(&json).with_context(|| format!("Invalid record in {}", path.display()))?
        }
        None => args.to_record()?,
    };

    let result = scorer.predict_record(&record)?;
    info!(id = %record.id, label = %result.label, "Prediction complete");
    let report = PredictionReport::new(record, result);

    match format {
        OutputFormat::Json => println!("{}", render::to_json(&report)?),
        OutputFormat::Table => print!("{}", render::prediction_table(&report, &config.output)),
    }
    Ok(())
}

pub async fn batch(
    scorer: &Scorer,
    args: &BatchArgs,
    config: &Config,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    info!(file = %args.file.display(), "Running batch");

    let outcome = run_interruptible(scorer.clone(), text).await?;
    let summary = BatchSummary::from_outcome(&outcome);

    if let Some(path) = &args.export_predictions {
        write_export(&config.export_path(path), &export_predictions(&outcome.predictions)).await?;
    }
    if let Some(path) = &args.export_records {
        write_export(&config.export_path(path), &export_records(&outcome.predictions)?).await?;
    }

    match format {
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct BatchReport<'a> {
                summary: &'a BatchSummary,
                outcome: &'a BatchOutcome,
            }
            println!(
                "{}",
                render::to_json(&BatchReport { summary: &summary, outcome: &outcome })?
            );
        }
        OutputFormat::Table => print!("{}", render::batch_table(&outcome, &summary, &config.output)),
    }
    Ok(())
}

/// Run the batch off the async runtime; Ctrl-C stops it between rows and the
/// rows processed so far are still reported.
async fn run_interruptible(scorer: Scorer, text: String) -> anyhow::Result<BatchOutcome> {
    let stop = Arc::new(AtomicBool::new(false));

    let watcher = {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, stopping after the current row");
                stop.store(true, Ordering::SeqCst);
            }
        })
    };

    let outcome = tokio::task::spawn_blocking(move || {
        BatchRunner::new(&scorer).run_while(&text, |_| !stop.load(Ordering::SeqCst))
    })
    .await
    .context("Batch worker failed")??;

    watcher.abort();
    Ok(outcome)
}

async fn write_export(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Export written");
    Ok(())
}

pub async fn sample(output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => write_export(path, SAMPLE_BATCH_CSV).await,
        None => {
            print!("{}", SAMPLE_BATCH_CSV);
            Ok(())
        }
    }
}

pub fn model_info(scorer: &Scorer, format: OutputFormat) -> anyhow::Result<()> {
    let metrics = model_metrics();
    let dataset = dataset_info();
    match format {
        OutputFormat::Json => {
            let info = render::ModelInfo::new(scorer.params(), &metrics, &dataset);
            println!("{}", render::to_json(&info)?);
        }
        OutputFormat::Table => print!("{}", render::model_info_table(scorer.params(), &metrics, &dataset)),
    }
    Ok(())
}
