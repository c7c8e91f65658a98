//! Stateless view models shared by every page.
//!
//! Nothing here knows about a particular dataset; pages fill these in and
//! both surfaces (the web dashboard and the terminal reports) render them.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::metrics::Status;
use crate::metrics::derived::score_bar_fill;

// ---------------------------------------------------------------------------
// Badge
// ---------------------------------------------------------------------------

/// Color family for badges and card accents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Success,
    Warning,
    Danger,
    Info,
}

impl From<Status> for Variant {
    fn from(status: Status) -> Self {
        match status {
            Status::Healthy => Self::Success,
            Status::Warning => Self::Warning,
            Status::Critical => Self::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub variant: Variant,
}

impl Badge {
    pub fn new(label: impl Into<String>, variant: Variant) -> Self {
        Self {
            label: label.into(),
            variant,
        }
    }

    /// Badge colored by a threshold classification.
    pub fn status(label: impl Into<String>, status: Status) -> Self {
        Self::new(label, status.into())
    }
}

// ---------------------------------------------------------------------------
// KPI card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub direction: Direction,
    pub label: String,
}

/// A headline number with optional context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<&'static str>,
    pub variant: Variant,
}

impl KpiCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            subtitle: None,
            trend: None,
            tooltip: None,
            variant: Variant::Default,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn trend(mut self, direction: Direction, label: impl Into<String>) -> Self {
        self.trend = Some(Trend {
            direction,
            label: label.into(),
        });
        self
    }

    pub fn tooltip(mut self, text: &'static str) -> Self {
        self.tooltip = Some(text);
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

/// Label/value line inside a section card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatRow {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl StatRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            badge: None,
        }
    }

    /// Row whose value is shown as a badge.
    pub fn badge(label: impl Into<String>, badge: Badge) -> Self {
        Self {
            label: label.into(),
            value: badge.label.clone(),
            badge: Some(badge),
        }
    }
}

// ---------------------------------------------------------------------------
// Score bar
// ---------------------------------------------------------------------------

/// Horizontal bar for a value on a bounded scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBar {
    pub label: String,
    pub value: f64,
    pub max: f64,
    pub fill_pct: f64,
}

impl ScoreBar {
    pub fn new(label: impl Into<String>, value: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            value,
            max,
            fill_pct: score_bar_fill(value, max),
        }
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

/// One x-axis position (or pie slice) with a value per series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub values: Vec<f64>,
}

/// Data for one chart; the renderer picks colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    /// Legend names, one per entry in each point's `values`.
    pub series: Vec<String>,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(title: impl Into<String>, kind: ChartKind, series: &[&str]) -> Self {
        Self {
            title: title.into(),
            kind,
            series: series.iter().map(|s| s.to_string()).collect(),
            points: Vec::new(),
        }
    }

    /// Single-series chart from `(label, value)` pairs.
    pub fn single<I, S>(title: impl Into<String>, kind: ChartKind, name: &str, points: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut chart = Self::new(title, kind, &[name]);
        for (label, value) in points {
            chart.push(label, vec![value]);
        }
        chart
    }

    pub fn push(&mut self, label: impl Into<String>, values: Vec<f64>) {
        self.points.push(ChartPoint {
            label: label.into(),
            values,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tooltips
// ---------------------------------------------------------------------------

/// Copy for the info icons next to card and section titles.
pub mod tooltips {
    pub const TOTAL_QUERIES: &str =
        "Number of unique, valid queries analyzed after removing duplicates.";
    pub const REWRITTEN: &str =
        "Queries processed through the Query Optimizer with entity matching and synonym expansion.";
    pub const PASSTHROUGH: &str = "Queries that matched no ontology entities and were sent to search unchanged. Serves as the baseline for comparison.";
    pub const AVG_LATENCY: &str =
        "Average time for the Query Optimizer to process and expand a query.";
    pub const ZERO_RESULT_RATE: &str =
        "Percentage of queries that returned zero search results. Lower is better.";
    pub const AVG_RESULTS: &str =
        "Mean number of documents returned by search. Higher indicates better recall.";
    pub const LATENCY_MIN: &str = "Fastest query processing time recorded.";
    pub const LATENCY_MAX: &str = "Slowest query processing time recorded.";
    pub const LATENCY_AVG: &str = "Mean processing time across all rewritten queries.";
    pub const LATENCY_P95: &str =
        "95th percentile latency. 95% of queries complete faster than this value.";
    pub const REWRITTEN_QUERIES: &str = "Queries processed through the Query Optimizer, showing matched entities, expansion count, processing time, and results.";
    pub const ZERO_RESULT_QUERIES: &str =
        "Queries that returned no results, indicating content gaps in the ontology.";
    pub const HEAD_TO_HEAD: &str =
        "Same query tested with and without rewriting to show the direct impact of the Query Optimizer.";
    pub const ENTITY_MATCH: &str =
        "Frequency of ontology entities detected across rewritten queries.";
    pub const QUALITY_SCORES: &str =
        "LLM-as-judge scores (1-5 scale) evaluating answer quality. Higher is better.";
    pub const STICKINESS: &str = "WAU / MAU. Share of monthly users who come back weekly.";
    pub const RESPONSE_TIME: &str = "Average end-to-end time from question to answer.";
    pub const POSITIVE_RATE: &str = "Share of feedback that was a thumbs up.";
    pub const REWRITTEN_ZERO_RATE: &str =
        "Percentage of rewritten queries that returned zero results.";
    pub const RECOMMENDATIONS: &str = "Suggested actions to improve content coverage.";
}

// ---------------------------------------------------------------------------
// Row keys and expansion state
// ---------------------------------------------------------------------------

/// Stable key for a list row: the record id, or its array index when the id
/// is empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn for_record(id: &str, index: usize) -> Self {
        if id.trim().is_empty() {
            Self(index.to_string())
        } else {
            Self(id.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Set of expanded row keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpandedRows(BTreeSet<RowKey>);

impl ExpandedRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` if absent, remove it if present.
    pub fn toggle(&mut self, key: RowKey) {
        if !self.0.remove(&key) {
            self.0.insert(key);
        }
    }

    pub fn contains(&self, key: &RowKey) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowKey> {
        self.0.iter()
    }
}

impl FromIterator<RowKey> for ExpandedRows {
    fn from_iter<I: IntoIterator<Item = RowKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Limited lists
// ---------------------------------------------------------------------------

/// The first `limit` rows of a filtered list, with the counts needed for the
/// "showing N of M" note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Limited<T> {
    pub rows: Vec<T>,
    pub shown: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<T> Limited<T> {
    pub fn new(rows: Vec<T>, limit: usize) -> Self {
        let total = rows.len();
        let mut rows = rows;
        rows.truncate(limit);
        let shown = rows.len();
        let note = (shown < total)
            .then(|| format!("Showing {shown} of {total} items. Use filters to narrow results."));
        Self {
            rows,
            shown,
            total,
            note,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.shown < self.total
    }
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Format a count with thousands separators (e.g. `1,234,567`).
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Percentage with at most one decimal, e.g. `62%` or `8.3%`.
pub fn format_pct(value: f64) -> String {
    format!("{}%", format_decimal(value))
}

/// At most one decimal, dropping a trailing `.0`.
pub fn format_decimal(value: f64) -> String {
    let s = format!("{value:.1}");
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}
