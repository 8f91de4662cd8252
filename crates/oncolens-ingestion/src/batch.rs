//! Batch runner: delimited text → `BatchOutcome`.
//!
//! Flow for one run:
//!   1. Parse records and drop blank ones; fewer than two remaining is fatal
//!   2. Resolve the header into a column layout; missing required columns is fatal
//!   3. For each data row: parse → validate → score
//!   4. Fold each row into the outcome as a prediction or a skip
//!
//! Rows are handled one at a time, so a host can stop the run between rows
//! (`run_while`) and still hold a consistent partial outcome.

use chrono::Utc;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use oncolens_common::{Feature, Measurements, PredictionResult, Record, FEATURE_COUNT};
use oncolens_ranker::Scorer;

use crate::error::{BatchError, Result, SkipReason};

pub const ID_COLUMN: &str = "id";
pub const NAME_COLUMN: &str = "name";
pub const AGE_COLUMN: &str = "age";

// ── Header layout ─────────────────────────────────────────────────────────────

/// Column positions resolved from the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchLayout {
    width: usize,
    measurements: [usize; FEATURE_COUNT],
    id: Option<usize>,
    name: Option<usize>,
    age: Option<usize>,
}

impl BatchLayout {
    /// Resolve columns by name. The first occurrence of a duplicated name wins.
    /// Missing measurement columns are reported together, in canonical order.
    pub fn from_header(header: &StringRecord) -> Result<Self> {
        let position = |column: &str| header.iter().position(|h| h == column);

        let mut measurements = [0usize; FEATURE_COUNT];
        let mut missing = Vec::new();
        for feature in Feature::ALL {
            match position(feature.ident()) {
                Some(i) => measurements[feature.index()] = i,
                None => missing.push(feature.ident().to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(BatchError::MissingColumns(missing));
        }

        Ok(Self {
            width: header.len(),
            measurements,
            id: position(ID_COLUMN),
            name: position(NAME_COLUMN),
            age: position(AGE_COLUMN),
        })
    }

    /// Number of header columns; every data row must match it.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Build a record from one data row.
    ///
    /// `data_index` is the 1-based data row index, used for synthesised ids.
    pub fn parse_row(
        &self,
        fields: &StringRecord,
        data_index: usize,
        run_token: i64,
    ) -> std::result::Result<Record, SkipReason> {
        if fields.len() != self.width {
            return Err(SkipReason::ColumnCount {
                expected: self.width,
                found: fields.len(),
            });
        }

        let optional = |column: Option<usize>| {
            column
                .and_then(|i| fields.get(i))
                .filter(|v| !v.is_empty())
        };

        let id = optional(self.id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("P{}-{}", run_token, data_index));
        let name = optional(self.name).map(str::to_string);
        let age = optional(self.age).and_then(parse_age);

        let mut values = [0.0f64; FEATURE_COUNT];
        for feature in Feature::ALL {
            let raw = fields.get(self.measurements[feature.index()]).unwrap_or("");
            values[feature.index()] =
                parse_measurement(raw).ok_or_else(|| SkipReason::InvalidNumber {
                    column: feature.ident().to_string(),
                    value: raw.to_string(),
                })?;
        }

        Ok(Record {
            id,
            name,
            age,
            measurements: Measurements::from_array(values),
        })
    }
}

/// A whitespace-only line parses as at most one empty field.
fn is_blank(fields: &StringRecord) -> bool {
    fields.len() <= 1 && fields.iter().all(str::is_empty)
}

/// Strict float parse; non-finite values ("NaN", "inf") are rejected.
fn parse_measurement(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Permissive age parse: leading digits only ("45", "45.5", "45y" → 45).
fn parse_age(raw: &str) -> Option<u32> {
    let digits: String = raw
        .strip_prefix('+')
        .unwrap_or(raw)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// One successfully scored row.
#[derive(Debug, Clone, Serialize)]
pub struct BatchPrediction {
    /// 1-based row number, header = 1.
    pub row: usize,
    pub record: Record,
    pub result: PredictionResult,
}

/// One skipped row with its diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based row number, header = 1.
    pub row: usize,
    pub reason: SkipReason,
}

/// Result of one batch run. Owns nothing beyond the run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub run_id: Uuid,
    /// Data rows consumed (scored + skipped).
    pub rows_seen: usize,
    /// Successful rows, input order.
    pub predictions: Vec<BatchPrediction>,
    pub skipped: Vec<SkippedRow>,
    /// The host stopped the run before the last row.
    pub interrupted: bool,
}

impl BatchOutcome {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            rows_seen: 0,
            predictions: Vec::new(),
            skipped: Vec::new(),
            interrupted: false,
        }
    }

    /// Fold one row into the outcome.
    fn absorb(
        &mut self,
        row: usize,
        processed: std::result::Result<(Record, PredictionResult), SkipReason>,
    ) {
        self.rows_seen += 1;
        match processed {
            Ok((record, result)) => {
                self.predictions.push(BatchPrediction { row, record, result });
            }
            Err(reason) => {
                warn!(row, %reason, "Row {} skipped", row);
                self.skipped.push(SkippedRow { row, reason });
            }
        }
    }

    pub fn scored_count(&self) -> usize {
        self.predictions.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

// ── Runner ────────────────────────────────────────────────────────────────────

/// Applies a `Scorer` to every row of a batch document.
#[derive(Debug, Clone, Copy)]
pub struct BatchRunner<'a> {
    scorer: &'a Scorer,
}

impl<'a> BatchRunner<'a> {
    pub fn new(scorer: &'a Scorer) -> Self {
        Self { scorer }
    }

    /// Process every row.
    pub fn run(&self, text: &str) -> Result<BatchOutcome> {
        self.run_while(text, |_| true)
    }

    /// Process rows while `keep_going` returns true. The predicate sees the
    /// outcome so far and is consulted before each data row.
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub fn run_while<F>(&self, text: &str, mut keep_going: F) -> Result<BatchOutcome>
    where
        F: FnMut(&BatchOutcome) -> bool,
    {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        // Blank lines are dropped after parsing so quoted fields keep their
        // embedded empty lines.
        let mut records = reader
            .records()
            .filter(|item| !matches!(item, Ok(fields) if is_blank(fields)))
            .collect::<Vec<_>>()
            .into_iter();
        if records.len() < 2 {
            return Err(BatchError::EmptyDocument);
        }

        let header = records.next().ok_or(BatchError::EmptyDocument)??;
        let layout = BatchLayout::from_header(&header)?;
        debug!(columns = layout.width(), "Header resolved");

        let mut outcome = BatchOutcome::new(Uuid::new_v4());
        let run_token = Utc::now().timestamp_millis();

        for (offset, item) in records.enumerate() {
            if !keep_going(&outcome) {
                outcome.interrupted = true;
                info!(run_id = %outcome.run_id, rows_seen = outcome.rows_seen, "Batch interrupted");
                break;
            }

            let data_index = offset + 1;
            let row = data_index + 1;
            let processed = match item {
                Ok(fields) => self.process_row(&layout, &fields, data_index, run_token),
                Err(e) => Err(SkipReason::Malformed { message: e.to_string() }),
            };
            outcome.absorb(row, processed);
        }

        info!(
            run_id = %outcome.run_id,
            scored = outcome.scored_count(),
            skipped = outcome.skipped_count(),
            "Batch complete"
        );
        Ok(outcome)
    }

    fn process_row(
        &self,
        layout: &BatchLayout,
        fields: &StringRecord,
        data_index: usize,
        run_token: i64,
    ) -> std::result::Result<(Record, PredictionResult), SkipReason> {
        let record = layout.parse_row(fields, data_index, run_token)?;
        let result = self
            .scorer
            .predict_record(&record)
            .map_err(|e| SkipReason::Scoring { message: e.to_string() })?;
        Ok((record, result))
    }
}
