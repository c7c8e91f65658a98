//! Dataset loading: the single parse-with-defaults step.
//!
//! The dashboard consumes three pre-aggregated JSON documents:
//!
//! - **`data.json`**: query rewriter metrics ([`RewriterMetrics`])
//! - **`adoption.json`**: production usage metrics ([`AdoptionMetrics`])
//! - **`feedback.json`**: thumbs up/down feedback ([`FeedbackMetrics`])
//!
//! Every field is optional in the input. Deserialization fills absent fields
//! with defaults, then [`Sanitize::sanitize`] clamps out-of-range values into
//! their invariant ranges and reports each correction. After loading, read
//! sites never default again.

pub mod adoption;
pub mod feedback;
pub mod rewriter;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::schema::DataConfig;

pub use adoption::AdoptionMetrics;
pub use feedback::FeedbackMetrics;
pub use rewriter::RewriterMetrics;

// ---------------------------------------------------------------------------
// Shared record pieces
// ---------------------------------------------------------------------------

/// Provenance block carried by every dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub generated_at: String,
    pub test_period: String,
    pub data_source: String,
}

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

/// A single out-of-range value that was clamped during loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correction {
    pub field: String,
    pub original: f64,
    pub corrected: f64,
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} clamped to {}",
            self.field, self.original, self.corrected
        )
    }
}

/// Clamp loaded values into their documented ranges.
pub trait Sanitize {
    /// Returns one [`Correction`] per value that had to change.
    fn sanitize(&mut self) -> Vec<Correction>;
}

/// Clamp `value` into `[lo, hi]`, recording a correction if it moved.
pub(crate) fn clamp_field(
    value: &mut f64,
    lo: f64,
    hi: f64,
    field: impl Into<String>,
    corrections: &mut Vec<Correction>,
) {
    let original = *value;
    let corrected = if original.is_finite() {
        original.clamp(lo, hi)
    } else {
        lo
    };

    if corrected != original {
        corrections.push(Correction {
            field: field.into(),
            original,
            corrected,
        });
        *value = corrected;
    }
}

/// Clamp a percentage into `[0, 100]`.
pub(crate) fn clamp_pct(value: &mut f64, field: impl Into<String>, out: &mut Vec<Correction>) {
    clamp_field(value, 0.0, 100.0, field, out);
}

/// Clamp a non-negative measurement (latency, averages) into `[0, ∞)`.
pub(crate) fn clamp_non_negative(
    value: &mut f64,
    field: impl Into<String>,
    out: &mut Vec<Correction>,
) {
    clamp_field(value, 0.0, f64::MAX, field, out);
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// A dataset document the dashboard knows how to load.
pub trait Dataset: DeserializeOwned + Default + Sanitize {
    /// Human-readable dataset name used in logs and reports.
    const NAME: &'static str;
}

/// How a dataset file was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// File read and parsed.
    Loaded,
    /// File absent; the all-default record is used.
    Missing,
    /// File present but unreadable or not a dataset document. Only reported
    /// by [`Datasets::inspect`]; [`Datasets::load`] fails instead.
    Invalid,
}

/// Outcome of loading one dataset file.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub name: String,
    pub path: PathBuf,
    pub status: LoadStatus,
    pub corrections: Vec<Correction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Load and sanitize one dataset file.
///
/// A missing file yields `T::default()` with [`LoadStatus::Missing`]; a file
/// that exists but does not parse is an error.
pub fn load_dataset<T: Dataset>(path: &Path) -> Result<(T, DatasetReport)> {
    let (mut data, status) = if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {} dataset at {}", T::NAME, path.display()))?;
        let data = parse_dataset::<T>(&content)
            .with_context(|| format!("invalid {} dataset at {}", T::NAME, path.display()))?;
        (data, LoadStatus::Loaded)
    } else {
        tracing::warn!(dataset = T::NAME, path = %path.display(), "dataset file not found, using empty defaults");
        (T::default(), LoadStatus::Missing)
    };

    let corrections = data.sanitize();
    for correction in &corrections {
        tracing::warn!(dataset = T::NAME, "{correction}");
    }

    let report = DatasetReport {
        name: T::NAME.to_string(),
        path: path.to_path_buf(),
        status,
        corrections,
        error: None,
    };

    Ok((data, report))
}

/// Like [`load_dataset`], but a file that fails to load becomes
/// `T::default()` with [`LoadStatus::Invalid`] and the error text.
pub fn inspect_dataset<T: Dataset>(path: &Path) -> (T, DatasetReport) {
    load_dataset::<T>(path).unwrap_or_else(|e| {
        tracing::warn!(dataset = T::NAME, path = %path.display(), error = %format!("{e:#}"), "dataset failed to load");
        let report = DatasetReport {
            name: T::NAME.to_string(),
            path: path.to_path_buf(),
            status: LoadStatus::Invalid,
            corrections: Vec::new(),
            error: Some(format!("{e:#}")),
        };
        (T::default(), report)
    })
}

/// Parse a dataset document from a JSON string, without sanitizing.
///
/// `null` is treated like an absent key, so it takes the field default.
pub fn parse_dataset<T: Dataset>(json: &str) -> Result<T> {
    let mut value: serde_json::Value =
        serde_json::from_str(json).context("failed to parse dataset JSON")?;
    strip_nulls(&mut value);
    serde_json::from_value(value).context("dataset JSON does not match the expected layout")
}

/// Drop `null` object members and array elements, recursively.
fn strip_nulls(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        serde_json::Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// The loaded dashboard inputs
// ---------------------------------------------------------------------------

/// All three datasets, loaded once at startup and borrowed by every view.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub rewriter: RewriterMetrics,
    pub adoption: AdoptionMetrics,
    pub feedback: FeedbackMetrics,
    pub reports: Vec<DatasetReport>,
}

impl Datasets {
    /// Load all datasets from the configured data directory.
    pub fn load(config: &DataConfig) -> Result<Self> {
        let dir = config.resolved_dir();
        tracing::debug!(dir = %dir.display(), "loading datasets");

        let (rewriter, rewriter_report) =
            load_dataset::<RewriterMetrics>(&dir.join(&config.rewriter_file))?;
        let (adoption, adoption_report) =
            load_dataset::<AdoptionMetrics>(&dir.join(&config.adoption_file))?;
        let (feedback, feedback_report) =
            load_dataset::<FeedbackMetrics>(&dir.join(&config.feedback_file))?;

        let datasets = Self {
            rewriter,
            adoption,
            feedback,
            reports: vec![rewriter_report, adoption_report, feedback_report],
        };

        tracing::info!(
            loaded = datasets.loaded_count(),
            corrections = datasets.correction_count(),
            "datasets ready"
        );

        Ok(datasets)
    }

    /// Load every dataset, recording failures in the reports instead of
    /// returning early. Used by `check` to diagnose a broken data directory.
    pub fn inspect(config: &DataConfig) -> Self {
        let dir = config.resolved_dir();
        let (rewriter, rewriter_report) =
            inspect_dataset::<RewriterMetrics>(&dir.join(&config.rewriter_file));
        let (adoption, adoption_report) =
            inspect_dataset::<AdoptionMetrics>(&dir.join(&config.adoption_file));
        let (feedback, feedback_report) =
            inspect_dataset::<FeedbackMetrics>(&dir.join(&config.feedback_file));

        Self {
            rewriter,
            adoption,
            feedback,
            reports: vec![rewriter_report, adoption_report, feedback_report],
        }
    }

    /// Build from already-parsed records (sanitizing them), with no reports.
    pub fn from_parts(
        mut rewriter: RewriterMetrics,
        mut adoption: AdoptionMetrics,
        mut feedback: FeedbackMetrics,
    ) -> Self {
        rewriter.sanitize();
        adoption.sanitize();
        feedback.sanitize();
        Self {
            rewriter,
            adoption,
            feedback,
            reports: Vec::new(),
        }
    }

    /// Number of dataset files that were present on disk.
    pub fn loaded_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.status == LoadStatus::Loaded)
            .count()
    }

    /// Total clamped values across all datasets.
    pub fn correction_count(&self) -> usize {
        self.reports.iter().map(|r| r.corrections.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_take_field_defaults() {
        let json = r#"{"wau": 120, "avgResponseTimeMs": null, "topUsers": null, "queryTrend": [null, {"date": "2026-10-01", "count": null}]}"#;
        let data: AdoptionMetrics = parse_dataset(json).unwrap();
        assert_eq!(data.wau, 120);
        assert_eq!(data.avg_response_time_ms, 0.0);
        assert!(data.top_users.is_empty());
        assert_eq!(data.query_trend.len(), 1);
        assert_eq!(data.query_trend[0].count, 0);
    }

    #[test]
    fn wrong_types_are_still_errors() {
        assert!(parse_dataset::<AdoptionMetrics>(r#"{"wau": "many"}"#).is_err());
    }

    #[test]
    fn clamp_field_records_correction() {
        let mut value = 130.0;
        let mut out = Vec::new();
        clamp_pct(&mut value, "stickiness", &mut out);

        assert_eq!(value, 100.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].field, "stickiness");
        assert_eq!(out[0].original, 130.0);
    }

    #[test]
    fn clamp_field_leaves_in_range_values() {
        let mut value = 42.5;
        let mut out = Vec::new();
        clamp_pct(&mut value, "rate", &mut out);

        assert_eq!(value, 42.5);
        assert!(out.is_empty());
    }

    #[test]
    fn clamp_non_negative_fixes_negative_latency() {
        let mut value = -3.0;
        let mut out = Vec::new();
        clamp_non_negative(&mut value, "latencyStats.avg", &mut out);
        assert_eq!(value, 0.0);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn correction_display_is_readable() {
        let c = Correction {
            field: "summary.positiveRate".to_string(),
            original: -5.0,
            corrected: 0.0,
        };
        assert_eq!(c.to_string(), "summary.positiveRate: -5 clamped to 0");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = Path::new("/definitely/not/here/adoption.json");
        let (data, report) = load_dataset::<AdoptionMetrics>(path).unwrap();
        assert_eq!(data.wau, 0);
        assert_eq!(report.status, LoadStatus::Missing);
    }
}
