//! Command-line surface.

use std::path::PathBuf;

use anyhow::bail;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use oncolens_common::{Feature, Measurements, Record};

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "oncolens",
    version,
    about = "Educational tumour malignancy estimates from cell-nucleus measurements",
    long_about = "Educational tool only. Not a diagnostic device; always consult qualified \
                  healthcare professionals."
)]
pub struct Cli {
    /// Path to oncolens.toml
    #[arg(long, global = true, env = "ONCOLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score a single record
    Predict(PredictArgs),
    /// Score every row of a CSV file
    Batch(BatchArgs),
    /// Write the sample batch CSV
    Sample {
        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show model parameters and evaluation figures
    ModelInfo,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// JSON file holding one record (camelCase keys)
    #[arg(long, conflicts_with_all = [
        "id", "name", "age",
        "mean_radius", "mean_texture", "mean_perimeter", "mean_area", "mean_smoothness",
        "worst_radius", "worst_texture", "worst_perimeter", "worst_area", "worst_smoothness",
    ])]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,

    #[arg(long)]
    pub mean_radius: Option<f64>,
    #[arg(long)]
    pub mean_texture: Option<f64>,
    #[arg(long)]
    pub mean_perimeter: Option<f64>,
    #[arg(long)]
    pub mean_area: Option<f64>,
    #[arg(long)]
    pub mean_smoothness: Option<f64>,
    #[arg(long)]
    pub worst_radius: Option<f64>,
    #[arg(long)]
    pub worst_texture: Option<f64>,
    #[arg(long)]
    pub worst_perimeter: Option<f64>,
    #[arg(long)]
    pub worst_area: Option<f64>,
    #[arg(long)]
    pub worst_smoothness: Option<f64>,
}

impl PredictArgs {
    fn measurement_flags(&self) -> [Option<f64>; 10] {
        [
            self.mean_radius,
            self.mean_texture,
            self.mean_perimeter,
            self.mean_area,
            self.mean_smoothness,
            self.worst_radius,
            self.worst_texture,
            self.worst_perimeter,
            self.worst_area,
            self.worst_smoothness,
        ]
    }

    /// Build a validated record from flags. Every measurement flag is
    /// required; missing ones are listed rather than defaulted.
    pub fn to_record(&self) -> anyhow::Result<Record> {
        let flags = self.measurement_flags();
        let missing: Vec<String> = Feature::ALL
            .iter()
            .filter(|f| flags[f.index()].is_none())
            .map(|f| format!("--{}", flag_name(f.ident())))
            .collect();
        if !missing.is_empty() {
            bail!("Missing required measurements: {}", missing.join(", "));
        }

        let values = flags.map(|v| v.unwrap_or(f64::NAN));
        let id = self
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("P{}", Utc::now().timestamp_millis()));

        let mut record = Record::new(id, Measurements::from_array(values))?;
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            record = record.with_name(name);
        }
        if let Some(age) = self.age {
            record = record.with_age(age);
        }
        Ok(record)
    }
}

/// `meanRadius` → `mean-radius`
fn flag_name(ident: &str) -> String {
    let mut out = String::new();
    for ch in ident.chars() {
        if ch.is_uppercase() {
            out.push('-');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// CSV file with a header row
    pub file: PathBuf,

    /// Write id,name,age,prediction,probability,confidence
    #[arg(long)]
    pub export_predictions: Option<PathBuf>,

    /// Write the scored rows back out with all measurement columns
    #[arg(long)]
    pub export_records: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_names() {
        assert_eq!(flag_name("meanRadius"), "mean-radius");
        assert_eq!(flag_name("worstSmoothness"), "worst-smoothness");
    }

    #[test]
    fn test_predict_flags_build_record() {
        let cli = Cli::try_parse_from([
            "oncolens", "predict", "--id", "P9", "--age", "40",
            "--mean-radius", "14.0", "--mean-texture", "19.0", "--mean-perimeter", "92.0",
            "--mean-area", "655.0", "--mean-smoothness", "0.096", "--worst-radius", "16.0",
            "--worst-texture", "26.0", "--worst-perimeter", "107.0", "--worst-area", "881.0",
            "--worst-smoothness", "0.132",
        ])
        .unwrap();
        let Command::Predict(args) = cli.command else { panic!("expected predict") };
        let record = args.to_record().unwrap();
        assert_eq!(record.id, "P9");
        assert_eq!(record.age, Some(40));
        assert_eq!(record.measurements.worst_area, 881.0);
    }

    #[test]
    fn test_predict_missing_flags_listed() {
        let cli = Cli::try_parse_from(["oncolens", "predict", "--mean-radius", "14.0"]).unwrap();
        let Command::Predict(args) = cli.command else { panic!("expected predict") };
        let err = args.to_record().unwrap_err().to_string();
        assert!(err.starts_with("Missing required measurements: --mean-texture"));
        assert!(err.contains("--worst-smoothness"));
        assert!(!err.contains("--mean-radius"));
    }

    #[test]
    fn test_input_conflicts_with_measurement_flags() {
        let err = Cli::try_parse_from([
            "oncolens", "predict", "--input", "r.json", "--mean-radius", "99",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        assert!(Cli::try_parse_from(["oncolens", "predict", "--input", "r.json"]).is_ok());
    }

    #[test]
    fn test_batch_args() {
        let cli = Cli::try_parse_from([
            "oncolens", "--format", "json", "batch", "data.csv", "--export-records", "out.csv",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        let Command::Batch(args) = cli.command else { panic!("expected batch") };
        assert_eq!(args.file, PathBuf::from("data.csv"));
        assert_eq!(args.export_records, Some(PathBuf::from("out.csv")));
        assert_eq!(args.export_predictions, None);
    }
}
