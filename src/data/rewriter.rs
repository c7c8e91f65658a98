//! Query rewriter metrics (`data.json`).
//!
//! Accepts both the current layout (`rewrittenCount`, `qualityScores`,
//! `rewrittenQueries`, `effectiveness`) and the earlier A/B-test layout
//! (`treatmentCount`, `evaluationScores`, `treatmentQueries`,
//! `zeroResultRates`, `avgResultCounts`). The A/B names are serde aliases; the
//! split effectiveness blocks are folded into [`Effectiveness`] on load.

use serde::{Deserialize, Serialize};

use super::{Correction, Dataset, Metadata, Sanitize, clamp_field, clamp_non_negative, clamp_pct};

/// Default latency budget for a rewrite, in milliseconds.
pub const DEFAULT_LATENCY_TARGET_MS: f64 = 40.0;

/// Upper bound of the LLM-as-judge quality scale.
pub const QUALITY_SCALE_MAX: f64 = 5.0;

// ---------------------------------------------------------------------------
// Top-level record
// ---------------------------------------------------------------------------

/// The full query rewriter dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRewriterMetrics", rename_all = "camelCase")]
pub struct RewriterMetrics {
    pub summary: RewriteSummary,
    pub effectiveness: Effectiveness,
    pub latency_stats: LatencyStats,
    pub quality_scores: QualityScores,
    pub rewritten_queries: Vec<RewrittenQuery>,
    pub zero_result_queries: Vec<ZeroResultQuery>,
    pub top_entities: Vec<EntityCount>,
    pub head_to_head: Option<HeadToHead>,
    pub metadata: Metadata,
}

impl Default for RewriterMetrics {
    fn default() -> Self {
        RawRewriterMetrics::default().into()
    }
}

impl Dataset for RewriterMetrics {
    const NAME: &'static str = "rewriter";
}

impl RewriterMetrics {
    /// Overall zero-result rate, as a percentage.
    ///
    /// Uses `summary.zeroResultRate` when the dataset provides it, otherwise
    /// derives it from the zero-result list against total queries.
    pub fn zero_result_rate(&self) -> f64 {
        if let Some(rate) = self.summary.zero_result_rate {
            return rate;
        }
        if self.summary.total_queries == 0 {
            return 0.0;
        }
        let rate = self.zero_result_queries.len() as f64 / self.summary.total_queries as f64 * 100.0;
        rate.min(100.0)
    }

    /// Zero-result queries that went through the rewriter.
    pub fn rewritten_zero_count(&self) -> usize {
        self.zero_result_queries
            .iter()
            .filter(|q| q.was_rewritten)
            .count()
    }

    /// Zero-result queries that were passed through unchanged.
    pub fn passthrough_zero_count(&self) -> usize {
        self.zero_result_queries.len() - self.rewritten_zero_count()
    }

    /// Sum of all entity match counts in the frequency table.
    pub fn total_entity_matches(&self) -> u64 {
        self.top_entities.iter().map(|e| e.count).sum()
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Headline counts and rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteSummary {
    pub total_queries: u64,
    #[serde(alias = "treatmentCount")]
    pub rewritten_count: u64,
    #[serde(alias = "controlCount")]
    pub passthrough_count: u64,
    /// Percentage of queries that were expanded.
    #[serde(alias = "treatmentPercentage")]
    pub rewrite_rate: f64,
    #[serde(alias = "controlPercentage")]
    pub passthrough_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_result_rate: Option<f64>,
}

/// Zero-result and result-count comparison between the two groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Effectiveness {
    pub rewritten_zero_rate: f64,
    pub passthrough_zero_rate: f64,
    pub rewritten_avg_results: f64,
    pub passthrough_avg_results: f64,
    pub improvement_percent: f64,
}

/// Rewrite latency distribution, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatencyStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub p95: f64,
    pub target: f64,
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            avg: 0.0,
            p95: 0.0,
            target: DEFAULT_LATENCY_TARGET_MS,
        }
    }
}

/// The three LLM-as-judge dimensions, each on a 0–5 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityDimensions {
    pub relevance: f64,
    pub groundedness: f64,
    pub completeness: f64,
}

impl QualityDimensions {
    /// Mean of the three dimensions.
    pub fn mean(&self) -> f64 {
        (self.relevance + self.groundedness + self.completeness) / 3.0
    }

    /// `(name, value)` pairs in display order.
    pub fn named(&self) -> [(&'static str, f64); 3] {
        [
            ("relevance", self.relevance),
            ("groundedness", self.groundedness),
            ("completeness", self.completeness),
        ]
    }

    fn sanitize_into(&mut self, prefix: &str, out: &mut Vec<Correction>) {
        clamp_field(&mut self.relevance, 0.0, QUALITY_SCALE_MAX, format!("{prefix}.relevance"), out);
        clamp_field(&mut self.groundedness, 0.0, QUALITY_SCALE_MAX, format!("{prefix}.groundedness"), out);
        clamp_field(&mut self.completeness, 0.0, QUALITY_SCALE_MAX, format!("{prefix}.completeness"), out);
    }
}

/// Quality scores split by group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityScores {
    #[serde(alias = "treatment")]
    pub rewritten: QualityDimensions,
    #[serde(alias = "control")]
    pub passthrough: QualityDimensions,
}

/// One query that was expanded with entity synonyms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewrittenQuery {
    pub id: String,
    pub query: String,
    pub matched_entities: Vec<String>,
    pub expansion_count: u64,
    pub rewrite_time_ms: f64,
    pub result_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<QualityDimensions>,
}

/// One query that returned no results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZeroResultQuery {
    pub id: String,
    pub query: String,
    pub root_cause: String,
    pub recommended_fix: String,
    pub was_rewritten: bool,
    pub matched_entities: Vec<String>,
    pub indexes_searched: Vec<String>,
}

/// Entity frequency table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityCount {
    pub entity: String,
    pub count: u64,
}

/// Best-case side-by-side example of a rewritten query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadToHead {
    pub query: String,
    pub treatment: HeadToHeadSide,
    pub control: HeadToHeadSide,
    /// Result-count gain of the rewritten side, in percent. Zero when absent.
    pub improvement: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadToHeadSide {
    pub result_count: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expanded_query: String,
    pub entities_matched: Vec<String>,
}

// ---------------------------------------------------------------------------
// Raw wire layout
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawRewriterMetrics {
    summary: RewriteSummary,
    effectiveness: Option<Effectiveness>,
    zero_result_rates: Option<GroupPair>,
    avg_result_counts: Option<AvgResultCounts>,
    latency_stats: LatencyStats,
    #[serde(alias = "evaluationScores")]
    quality_scores: QualityScores,
    #[serde(alias = "treatmentQueries")]
    rewritten_queries: Vec<RewrittenQuery>,
    zero_result_queries: Vec<ZeroResultQuery>,
    #[serde(alias = "entityMatchSummary")]
    top_entities: Vec<EntityCount>,
    head_to_head: Option<HeadToHead>,
    metadata: Metadata,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GroupPair {
    treatment: f64,
    control: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AvgResultCounts {
    treatment: f64,
    control: f64,
    improvement_percent: f64,
}

impl From<RawRewriterMetrics> for RewriterMetrics {
    fn from(raw: RawRewriterMetrics) -> Self {
        let effectiveness = raw.effectiveness.unwrap_or_else(|| {
            let zero = raw.zero_result_rates.unwrap_or_default();
            let avg = raw.avg_result_counts.unwrap_or_default();
            Effectiveness {
                rewritten_zero_rate: zero.treatment,
                passthrough_zero_rate: zero.control,
                rewritten_avg_results: avg.treatment,
                passthrough_avg_results: avg.control,
                improvement_percent: avg.improvement_percent,
            }
        });

        Self {
            summary: raw.summary,
            effectiveness,
            latency_stats: raw.latency_stats,
            quality_scores: raw.quality_scores,
            rewritten_queries: raw.rewritten_queries,
            zero_result_queries: raw.zero_result_queries,
            top_entities: raw.top_entities,
            head_to_head: raw.head_to_head,
            metadata: raw.metadata,
        }
    }
}

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

impl Sanitize for RewriterMetrics {
    fn sanitize(&mut self) -> Vec<Correction> {
        let mut out = Vec::new();

        clamp_pct(&mut self.summary.rewrite_rate, "summary.rewriteRate", &mut out);
        clamp_pct(&mut self.summary.passthrough_rate, "summary.passthroughRate", &mut out);
        if let Some(rate) = self.summary.zero_result_rate.as_mut() {
            clamp_pct(rate, "summary.zeroResultRate", &mut out);
        }

        let e = &mut self.effectiveness;
        clamp_pct(&mut e.rewritten_zero_rate, "effectiveness.rewrittenZeroRate", &mut out);
        clamp_pct(&mut e.passthrough_zero_rate, "effectiveness.passthroughZeroRate", &mut out);
        clamp_non_negative(&mut e.rewritten_avg_results, "effectiveness.rewrittenAvgResults", &mut out);
        clamp_non_negative(&mut e.passthrough_avg_results, "effectiveness.passthroughAvgResults", &mut out);

        let l = &mut self.latency_stats;
        clamp_non_negative(&mut l.min, "latencyStats.min", &mut out);
        clamp_non_negative(&mut l.max, "latencyStats.max", &mut out);
        clamp_non_negative(&mut l.avg, "latencyStats.avg", &mut out);
        clamp_non_negative(&mut l.p95, "latencyStats.p95", &mut out);
        if l.target <= 0.0 {
            out.push(Correction {
                field: "latencyStats.target".to_string(),
                original: l.target,
                corrected: DEFAULT_LATENCY_TARGET_MS,
            });
            l.target = DEFAULT_LATENCY_TARGET_MS;
        }

        self.quality_scores.rewritten.sanitize_into("qualityScores.rewritten", &mut out);
        self.quality_scores.passthrough.sanitize_into("qualityScores.passthrough", &mut out);

        for (i, q) in self.rewritten_queries.iter_mut().enumerate() {
            clamp_non_negative(&mut q.rewrite_time_ms, format!("rewrittenQueries[{i}].rewriteTimeMs"), &mut out);
            if let Some(scores) = q.scores.as_mut() {
                scores.sanitize_into(&format!("rewrittenQueries[{i}].scores"), &mut out);
            }
        }

        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_dataset;

    #[test]
    fn empty_document_parses_to_defaults() {
        let data: RewriterMetrics = parse_dataset("{}").unwrap();
        assert_eq!(data.summary.total_queries, 0);
        assert_eq!(data.latency_stats.target, DEFAULT_LATENCY_TARGET_MS);
        assert!(data.rewritten_queries.is_empty());
        assert!(data.head_to_head.is_none());
    }

    #[test]
    fn current_layout_parses() {
        let json = r#"{
            "summary": {"totalQueries": 120, "rewrittenCount": 74, "passthroughCount": 46, "rewriteRate": 61.7},
            "effectiveness": {"rewrittenZeroRate": 8.1, "passthroughZeroRate": 19.6},
            "latencyStats": {"min": 1.2, "max": 22.0, "avg": 6.4, "p95": 14.9, "target": 40},
            "qualityScores": {
                "rewritten": {"relevance": 4.2, "groundedness": 4.5, "completeness": 4.0},
                "passthrough": {"relevance": 3.9, "groundedness": 4.1, "completeness": 3.6}
            },
            "topEntities": [{"entity": "UPS", "count": 12}]
        }"#;
        let data: RewriterMetrics = parse_dataset(json).unwrap();
        assert_eq!(data.summary.rewritten_count, 74);
        assert_eq!(data.effectiveness.passthrough_zero_rate, 19.6);
        assert_eq!(data.quality_scores.rewritten.groundedness, 4.5);
        assert_eq!(data.top_entities[0].entity, "UPS");
    }

    #[test]
    fn ab_layout_maps_onto_current_names() {
        let json = r#"{
            "summary": {"totalQueries": 10, "treatmentCount": 6, "controlCount": 4, "treatmentPercentage": 60.0},
            "zeroResultRates": {"treatment": 5.0, "control": 25.0},
            "avgResultCounts": {"treatment": 7.5, "control": 4.2, "improvementPercent": 78.6},
            "evaluationScores": {
                "treatment": {"relevance": 4.0, "groundedness": 4.0, "completeness": 4.0},
                "control": {"relevance": 3.0, "groundedness": 3.0, "completeness": 3.0}
            },
            "treatmentQueries": [{"id": "a1", "query": "ups battery", "rewriteTimeMs": 3.1}],
            "entityMatchSummary": [{"entity": "PDU", "count": 3}]
        }"#;
        let data: RewriterMetrics = parse_dataset(json).unwrap();
        assert_eq!(data.summary.rewritten_count, 6);
        assert_eq!(data.summary.rewrite_rate, 60.0);
        assert_eq!(data.effectiveness.rewritten_zero_rate, 5.0);
        assert_eq!(data.effectiveness.passthrough_avg_results, 4.2);
        assert_eq!(data.quality_scores.passthrough.relevance, 3.0);
        assert_eq!(data.rewritten_queries.len(), 1);
        assert_eq!(data.top_entities[0].count, 3);
    }

    #[test]
    fn zero_result_rate_prefers_explicit_value() {
        let mut data = RewriterMetrics::default();
        data.summary.total_queries = 100;
        data.zero_result_queries = vec![ZeroResultQuery::default(); 20];
        assert_eq!(data.zero_result_rate(), 20.0);

        data.summary.zero_result_rate = Some(8.3);
        assert_eq!(data.zero_result_rate(), 8.3);
    }

    #[test]
    fn zero_result_rate_without_queries_is_zero() {
        let data = RewriterMetrics::default();
        assert_eq!(data.zero_result_rate(), 0.0);
    }

    #[test]
    fn zero_split_counts() {
        let mut data = RewriterMetrics::default();
        data.zero_result_queries = vec![
            ZeroResultQuery { was_rewritten: true, ..Default::default() },
            ZeroResultQuery { was_rewritten: false, ..Default::default() },
            ZeroResultQuery { was_rewritten: true, ..Default::default() },
        ];
        assert_eq!(data.rewritten_zero_count(), 2);
        assert_eq!(data.passthrough_zero_count(), 1);
    }

    #[test]
    fn sanitize_clamps_quality_and_target() {
        let mut data = RewriterMetrics::default();
        data.quality_scores.rewritten.relevance = 7.0;
        data.latency_stats.target = 0.0;
        data.summary.rewrite_rate = 140.0;

        let corrections = data.sanitize();
        assert_eq!(corrections.len(), 3);
        assert_eq!(data.quality_scores.rewritten.relevance, 5.0);
        assert_eq!(data.latency_stats.target, DEFAULT_LATENCY_TARGET_MS);
        assert_eq!(data.summary.rewrite_rate, 100.0);
    }

    #[test]
    fn quality_mean() {
        let q = QualityDimensions {
            relevance: 4.2,
            groundedness: 4.5,
            completeness: 4.0,
        };
        assert!((q.mean() - 4.2333).abs() < 1e-3);
    }
}
