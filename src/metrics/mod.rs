//! Derived health scores.
//!
//! Three 0–100 scores summarize the dashboard:
//!
//! - **Query performance**: latency, rewrite (match) rate, answer quality
//! - **User adoption**: stickiness, positive feedback rate, weekly actives
//! - **Content health**: `100 − zero-result rate`
//!
//! Their mean is the overall system health, labelled by
//! [`HealthStatus`]. Weights and caps come from
//! [`ScoringConfig`](crate::config::schema::ScoringConfig); every function
//! here is pure and total: absent data contributes 0, and the result is
//! always finite and within `[0, 100]`.

pub mod derived;
pub mod status;

use std::fmt;

use serde::Serialize;

use crate::config::schema::ScoringConfig;
use crate::data::Datasets;
use crate::data::rewriter::{QUALITY_SCALE_MAX, QualityDimensions};

pub use status::{HealthStatus, Status};

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// One weighted input to a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub label: &'static str,
    /// The raw input as read from the dataset.
    pub input: f64,
    /// The input mapped onto 0–100.
    pub normalized: f64,
    pub weight: f64,
}

impl Component {
    fn contribution(&self) -> f64 {
        self.normalized * self.weight
    }
}

/// A derived score together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub name: &'static str,
    /// Unrounded value in `[0, 100]`.
    pub value: f64,
    pub components: Vec<Component>,
}

impl Score {
    fn weighted(name: &'static str, components: Vec<Component>) -> Self {
        let value = clamp_score(components.iter().map(Component::contribution).sum());
        Self {
            name,
            value,
            components,
        }
    }

    /// Value rounded to the nearest integer for display.
    pub fn display_value(&self) -> u8 {
        // `value` is clamped to [0, 100], so the cast cannot truncate.
        self.value.round() as u8
    }

    /// Human-readable breakdown, e.g. `latency 18 → 91.1 ×0.4 + ...`.
    pub fn breakdown(&self) -> String {
        self.components
            .iter()
            .map(|c| {
                format!(
                    "{} {} → {:.1} ×{}",
                    c.label,
                    trim_float(c.input),
                    c.normalized,
                    c.weight
                )
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.display_value())
    }
}

/// Clamp into `[0, 100]`, mapping non-finite values to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn trim_float(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

// ---------------------------------------------------------------------------
// Query performance
// ---------------------------------------------------------------------------

/// Map average rewrite latency onto 0–100.
///
/// 100 at or below the floor (10 ms by default), falling linearly to 0 over
/// the span (90 ms by default).
pub fn latency_score(avg_latency_ms: f64, cfg: &ScoringConfig) -> f64 {
    let avg = finite_or_zero(avg_latency_ms);
    let span = if cfg.latency_span_ms > 0.0 {
        cfg.latency_span_ms
    } else {
        1.0
    };
    clamp_score(100.0 - (avg - cfg.latency_floor_ms) * (100.0 / span))
}

/// Mean of the three quality dimensions as a percentage of the 1–5 scale.
pub fn quality_score(scores: &QualityDimensions) -> f64 {
    clamp_score(scores.mean() / QUALITY_SCALE_MAX * 100.0)
}

/// Query performance from its raw inputs.
pub fn query_performance_from(
    avg_latency_ms: f64,
    rewrite_rate: f64,
    quality: &QualityDimensions,
    cfg: &ScoringConfig,
) -> Score {
    Score::weighted(
        "Query Performance",
        vec![
            Component {
                label: "latency ms",
                input: finite_or_zero(avg_latency_ms),
                normalized: latency_score(avg_latency_ms, cfg),
                weight: cfg.latency_weight,
            },
            Component {
                label: "match rate %",
                input: finite_or_zero(rewrite_rate),
                normalized: clamp_score(rewrite_rate),
                weight: cfg.match_rate_weight,
            },
            Component {
                label: "quality /5",
                input: finite_or_zero(quality.mean()),
                normalized: quality_score(quality),
                weight: cfg.quality_weight,
            },
        ],
    )
}

/// Query performance for a loaded dataset (uses the rewritten group's quality).
pub fn query_performance(datasets: &Datasets, cfg: &ScoringConfig) -> Score {
    let rewriter = &datasets.rewriter;
    query_performance_from(
        rewriter.latency_stats.avg,
        rewriter.summary.rewrite_rate,
        &rewriter.quality_scores.rewritten,
        cfg,
    )
}

// ---------------------------------------------------------------------------
// User adoption
// ---------------------------------------------------------------------------

/// `min(100, value / cap × 100)`; a non-positive cap yields 0.
fn capped_ratio(value: f64, cap: f64) -> f64 {
    if cap <= 0.0 {
        return 0.0;
    }
    clamp_score(finite_or_zero(value) / cap * 100.0)
}

/// User adoption from its raw inputs.
pub fn user_adoption_from(
    stickiness: f64,
    positive_rate: f64,
    wau: u64,
    cfg: &ScoringConfig,
) -> Score {
    Score::weighted(
        "User Adoption",
        vec![
            Component {
                label: "stickiness %",
                input: finite_or_zero(stickiness),
                normalized: capped_ratio(stickiness, cfg.stickiness_cap),
                weight: cfg.stickiness_weight,
            },
            Component {
                label: "positive feedback %",
                input: finite_or_zero(positive_rate),
                normalized: clamp_score(positive_rate),
                weight: cfg.feedback_weight,
            },
            Component {
                label: "WAU",
                input: wau as f64,
                normalized: capped_ratio(wau as f64, cfg.wau_cap),
                weight: cfg.wau_weight,
            },
        ],
    )
}

/// User adoption for the loaded adoption and feedback datasets.
pub fn user_adoption(datasets: &Datasets, cfg: &ScoringConfig) -> Score {
    user_adoption_from(
        datasets.adoption.stickiness,
        datasets.feedback.summary.positive_rate,
        datasets.adoption.wau,
        cfg,
    )
}

// ---------------------------------------------------------------------------
// Content health
// ---------------------------------------------------------------------------

/// Content health from a zero-result rate (percentage).
pub fn content_health_from(zero_result_rate: f64) -> Score {
    let rate = clamp_score(zero_result_rate);
    Score::weighted(
        "Content Health",
        vec![Component {
            label: "zero-result rate %",
            input: finite_or_zero(zero_result_rate),
            normalized: 100.0 - rate,
            weight: 1.0,
        }],
    )
}

/// Content health for the loaded rewriter dataset.
pub fn content_health(datasets: &Datasets) -> Score {
    content_health_from(datasets.rewriter.zero_result_rate())
}

// ---------------------------------------------------------------------------
// Overall
// ---------------------------------------------------------------------------

/// All three scores plus their mean and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemHealth {
    pub query_performance: Score,
    pub user_adoption: Score,
    pub content_health: Score,
    pub overall: f64,
    pub status: HealthStatus,
}

impl SystemHealth {
    /// Combine three computed scores.
    pub fn from_scores(
        query_performance: Score,
        user_adoption: Score,
        content_health: Score,
        cfg: &ScoringConfig,
    ) -> Self {
        let overall =
            clamp_score((query_performance.value + user_adoption.value + content_health.value) / 3.0);
        Self {
            query_performance,
            user_adoption,
            content_health,
            overall,
            // Label what is displayed: a mean of 69.6 shows as 70, so it is healthy.
            status: HealthStatus::classify(overall.round(), cfg),
        }
    }

    /// The three scores in display order.
    pub fn scores(&self) -> [&Score; 3] {
        [
            &self.query_performance,
            &self.user_adoption,
            &self.content_health,
        ]
    }

    pub fn overall_display(&self) -> u8 {
        self.overall.round() as u8
    }
}

/// Compute every score for the loaded datasets.
pub fn system_health(datasets: &Datasets, cfg: &ScoringConfig) -> SystemHealth {
    SystemHealth::from_scores(
        query_performance(datasets, cfg),
        user_adoption(datasets, cfg),
        content_health(datasets),
        cfg,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ScoringConfig {
        ScoringConfig::default()
    }

    fn quality(r: f64, g: f64, c: f64) -> QualityDimensions {
        QualityDimensions {
            relevance: r,
            groundedness: g,
            completeness: c,
        }
    }

    #[test]
    fn latency_score_boundaries() {
        assert_eq!(latency_score(0.0, &cfg()), 100.0);
        assert_eq!(latency_score(10.0, &cfg()), 100.0);
        assert!((latency_score(55.0, &cfg()) - 50.0).abs() < 1e-9);
        assert!(latency_score(100.0, &cfg()).abs() < 1e-9);
        assert_eq!(latency_score(500.0, &cfg()), 0.0);
    }

    #[test]
    fn latency_score_worked_example() {
        assert!((latency_score(18.0, &cfg()) - 91.111).abs() < 1e-3);
    }

    #[test]
    fn quality_score_worked_example() {
        let q = quality(4.2, 4.5, 4.0);
        assert!((quality_score(&q) - 84.667).abs() < 1e-3);
    }

    #[test]
    fn query_performance_worked_example() {
        let score = query_performance_from(18.0, 62.0, &quality(4.2, 4.5, 4.0), &cfg());
        // 0.4 × 91.11 + 0.3 × 62 + 0.3 × 84.67
        assert!((score.value - 80.444).abs() < 1e-2);
        assert_eq!(score.display_value(), 80);
        assert_eq!(score.components.len(), 3);
    }

    #[test]
    fn user_adoption_worked_example() {
        let score = user_adoption_from(30.0, 80.0, 120, &cfg());
        assert!((score.components[0].normalized - 60.0).abs() < 1e-9);
        assert!((score.components[2].normalized - 80.0).abs() < 1e-9);
        assert!((score.value - 72.0).abs() < 1e-9);
        assert_eq!(score.display_value(), 72);
    }

    #[test]
    fn user_adoption_caps_components() {
        let score = user_adoption_from(90.0, 100.0, 10_000, &cfg());
        assert_eq!(score.value, 100.0);
    }

    #[test]
    fn content_health_worked_example() {
        let score = content_health_from(8.3);
        assert!((score.value - 91.7).abs() < 1e-9);
        assert_eq!(score.display_value(), 92);
    }

    #[test]
    fn all_zero_inputs_give_finite_scores() {
        let datasets = Datasets::default();
        let health = system_health(&datasets, &cfg());
        for score in health.scores() {
            assert!(score.value.is_finite());
            assert!((0.0..=100.0).contains(&score.value));
        }
        // latency 0 → 100 × 0.4 = 40; adoption 0; content 100
        assert_eq!(health.query_performance.display_value(), 40);
        assert_eq!(health.user_adoption.display_value(), 0);
        assert_eq!(health.content_health.display_value(), 100);
    }

    #[test]
    fn non_finite_inputs_are_zeroed() {
        let score = query_performance_from(f64::NAN, f64::INFINITY, &quality(f64::NAN, 1.0, 1.0), &cfg());
        assert!(score.value.is_finite());
        let score = user_adoption_from(f64::NEG_INFINITY, f64::NAN, 0, &cfg());
        assert_eq!(score.value, 0.0);
    }

    #[test]
    fn overall_is_mean_of_scores() {
        let health = SystemHealth::from_scores(
            content_health_from(10.0),
            content_health_from(40.0),
            content_health_from(70.0),
            &cfg(),
        );
        assert!((health.overall - 60.0).abs() < 1e-9);
        assert_eq!(health.status, HealthStatus::NeedsAttention);
    }

    #[test]
    fn breakdown_lists_every_input() {
        let score = user_adoption_from(30.0, 80.0, 120, &cfg());
        let text = score.breakdown();
        assert!(text.contains("stickiness % 30 → 60.0 ×0.4"));
        assert!(text.contains("WAU 120 → 80.0 ×0.3"));
    }

    #[test]
    fn zero_cap_does_not_divide_by_zero() {
        let mut c = cfg();
        c.wau_cap = 0.0;
        let score = user_adoption_from(0.0, 0.0, 50, &c);
        assert_eq!(score.value, 0.0);
    }
}
