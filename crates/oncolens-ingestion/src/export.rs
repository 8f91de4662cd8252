//! CSV export of batch results.

use csv::{QuoteStyle, WriterBuilder};

use oncolens_common::Feature;

use crate::batch::BatchPrediction;
use crate::error::Result;

/// Result table: `id,name,age,prediction,probability,confidence`.
///
/// Name is always quoted; probability and confidence use 4 decimals.
/// Formatted by hand because `csv::QuoteStyle` cannot force quoting on a single column.
pub fn export_predictions(predictions: &[BatchPrediction]) -> String {
    let mut out = String::from("id,name,age,prediction,probability,confidence");
    for p in predictions {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{:.4},{:.4}",
            escape_field(&p.record.id),
            quote(p.record.name.as_deref().unwrap_or("")),
            p.record.age.map(|a| a.to_string()).unwrap_or_default(),
            p.result.label,
            p.result.probability,
            p.result.confidence,
        ));
    }
    out.push('\n');
    out
}

/// Re-ingestible document: the input columns followed by the result columns.
/// Measurements use shortest round-trip formatting so re-scoring is exact.
pub fn export_records(predictions: &[BatchPrediction]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    let mut header = vec!["id", "name", "age"];
    header.extend(Feature::ALL.iter().map(|f| f.ident()));
    header.extend(["prediction", "probability", "confidence"]);
    writer.write_record(&header)?;

    for p in predictions {
        let mut row = vec![
            p.record.id.clone(),
            p.record.name.clone().unwrap_or_default(),
            p.record.age.map(|a| a.to_string()).unwrap_or_default(),
        ];
        row.extend(p.record.measurements.as_array().iter().map(|v| v.to_string()));
        row.push(p.result.label.to_string());
        row.push(format!("{:.4}", p.result.probability));
        row.push(format!("{:.4}", p.result.confidence));
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quote(value)
    } else {
        value.to_string()
    }
}
