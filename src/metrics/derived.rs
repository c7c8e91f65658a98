//! Secondary figures shown next to the raw dataset values: deltas, shares,
//! and fill percentages.

use serde::Serialize;

use crate::data::rewriter::{DEFAULT_LATENCY_TARGET_MS, QualityDimensions};

/// Round to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Per-dimension quality difference, rewritten minus pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityDelta {
    pub relevance: f64,
    pub groundedness: f64,
    pub completeness: f64,
    /// Sum of the three deltas.
    pub total: f64,
}

impl QualityDelta {
    pub fn between(rewritten: &QualityDimensions, passthrough: &QualityDimensions) -> Self {
        let relevance = round_to(rewritten.relevance - passthrough.relevance, 2);
        let groundedness = round_to(rewritten.groundedness - passthrough.groundedness, 2);
        let completeness = round_to(rewritten.completeness - passthrough.completeness, 2);
        Self {
            relevance,
            groundedness,
            completeness,
            total: round_to(relevance + groundedness + completeness, 2),
        }
    }

    /// Delta for a named dimension.
    pub fn get(&self, dimension: &str) -> f64 {
        match dimension {
            "relevance" => self.relevance,
            "groundedness" => self.groundedness,
            "completeness" => self.completeness,
            _ => 0.0,
        }
    }
}

/// Signed delta label with two decimals, e.g. `+0.30` or `-0.12`.
pub fn signed(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{delta:.2}")
    } else {
        format!("{delta:.2}")
    }
}

/// Share of negative feedback, `100 − positiveRate`, one decimal.
pub fn negative_share(positive_rate: f64) -> f64 {
    round_to((100.0 - positive_rate).clamp(0.0, 100.0), 1)
}

/// How much of the latency budget the slowest rewrite used, capped at 100 %.
///
/// A non-positive target falls back to the default 40 ms budget.
pub fn latency_budget_fill(max_ms: f64, target_ms: f64) -> f64 {
    let target = if target_ms > 0.0 {
        target_ms
    } else {
        DEFAULT_LATENCY_TARGET_MS
    };
    (max_ms / target * 100.0).clamp(0.0, 100.0)
}

/// Width of a score bar as a percentage of `max_score`.
pub fn score_bar_fill(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 || !score.is_finite() {
        return 0.0;
    }
    (score / max_score * 100.0).clamp(0.0, 100.0)
}

/// Milliseconds to seconds, one decimal.
pub fn seconds(ms: f64) -> f64 {
    round_to(ms / 1000.0, 1)
}

/// `part / whole` as a percentage, 0 when `whole` is 0.
pub fn share_pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
