//! Query Rewriter: effectiveness, latency, answer quality, and the
//! rewritten-query table.

use serde::Serialize;

use crate::config::schema::NexusConfig;
use crate::data::Datasets;
use crate::data::rewriter::{HeadToHead, QUALITY_SCALE_MAX, QualityDimensions, RewrittenQuery};
use crate::filter::{self, apply_indexed};
use crate::metrics::derived::{QualityDelta, latency_budget_fill, share_pct, signed};
use crate::metrics::status;
use crate::view::ViewState;
use crate::view::components::{
    Badge, ChartKind, ChartSeries, Direction, KpiCard, Limited, RowKey, ScoreBar, Variant,
    format_count, format_decimal, format_pct, tooltips,
};

use super::PageHeader;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriterPage {
    pub header: PageHeader,
    pub kpis: Vec<KpiCard>,
    pub zero_rate_chart: ChartSeries,
    pub avg_results_chart: ChartSeries,
    pub improvement_percent: f64,
    pub latency: LatencyPanel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityPanel>,
    pub entities: Limited<EntityRow>,
    pub entity_chart: ChartSeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_to_head: Option<HeadToHeadPanel>,
    pub queries: QueryTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyPanel {
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
    pub p95_ms: f64,
    pub target_ms: f64,
    /// Slowest rewrite as a share of the budget, capped at 100.
    pub budget_fill_pct: f64,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityPanel {
    pub rewritten: Vec<ScoreBar>,
    pub passthrough: Vec<ScoreBar>,
    pub deltas: Vec<DeltaRow>,
    pub total_delta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaRow {
    pub dimension: &'static str,
    pub delta: f64,
    pub label: String,
    pub variant: Variant,
}

/// The head-to-head example plus what the rewrite gained over pass-through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadPanel {
    #[serde(flatten)]
    pub example: HeadToHead,
    /// Rewritten result count minus pass-through result count.
    pub results_difference: i64,
    pub improvement_percent: f64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRow {
    pub entity: String,
    pub count: u64,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryTable {
    pub search: String,
    pub entity: String,
    pub entity_options: Vec<String>,
    pub list: Limited<QueryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRow {
    pub key: RowKey,
    pub query: String,
    pub matched_entities: Vec<String>,
    pub expansion_count: u64,
    pub rewrite_time_ms: f64,
    pub rewrite_badge: Badge,
    pub result_count: u64,
    pub expanded: bool,
    /// Per-query judge scores, present only for expanded rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<ScoreBar>>,
}

fn quality_bars(scores: &QualityDimensions) -> Vec<ScoreBar> {
    scores
        .named()
        .into_iter()
        .map(|(name, value)| ScoreBar::new(name, value, QUALITY_SCALE_MAX))
        .collect()
}

fn is_blank(scores: &QualityDimensions) -> bool {
    scores.named().iter().all(|(_, v)| *v == 0.0)
}

fn quality_panel(rewritten: &QualityDimensions, passthrough: &QualityDimensions) -> Option<QualityPanel> {
    if is_blank(rewritten) && is_blank(passthrough) {
        return None;
    }
    let delta = QualityDelta::between(rewritten, passthrough);
    let deltas = rewritten
        .named()
        .into_iter()
        .map(|(dimension, _)| {
            let d = delta.get(dimension);
            DeltaRow {
                dimension,
                delta: d,
                label: signed(d),
                variant: if d > 0.0 {
                    Variant::Success
                } else if d < 0.0 {
                    Variant::Danger
                } else {
                    Variant::Default
                },
            }
        })
        .collect();

    Some(QualityPanel {
        rewritten: quality_bars(rewritten),
        passthrough: quality_bars(passthrough),
        deltas,
        total_delta: signed(delta.total),
    })
}

fn head_to_head_panel(example: &HeadToHead) -> HeadToHeadPanel {
    let rewritten = example.treatment.result_count as i64;
    let passthrough = example.control.result_count as i64;
    let results_difference = rewritten - passthrough;
    // Derive the gain when the dataset leaves it out.
    let improvement_percent = if example.improvement != 0.0 || passthrough == 0 {
        example.improvement
    } else {
        results_difference as f64 / passthrough as f64 * 100.0
    };
    let summary = format!(
        "Query Optimizer delivered {results_difference:+} additional results ({}{}%)",
        if improvement_percent > 0.0 { "+" } else { "" },
        format_decimal(improvement_percent)
    );
    HeadToHeadPanel {
        example: example.clone(),
        results_difference,
        improvement_percent,
        summary,
    }
}

fn query_row(index: usize, query: &RewrittenQuery, state: &ViewState) -> QueryRow {
    let key = RowKey::for_record(&query.id, index);
    let expanded = state.expanded.contains(&key);
    QueryRow {
        query: query.query.clone(),
        matched_entities: query.matched_entities.clone(),
        expansion_count: query.expansion_count,
        rewrite_time_ms: query.rewrite_time_ms,
        rewrite_badge: Badge::status(
            format!("{}ms", format_decimal(query.rewrite_time_ms)),
            status::rewrite_time(query.rewrite_time_ms),
        ),
        result_count: query.result_count,
        scores: if expanded {
            query.scores.as_ref().map(quality_bars)
        } else {
            None
        },
        expanded,
        key,
    }
}

pub fn build(datasets: &Datasets, config: &NexusConfig, state: &ViewState) -> RewriterPage {
    let data = &datasets.rewriter;
    let summary = &data.summary;
    let eff = &data.effectiveness;
    let lat = &data.latency_stats;

    let latency_status = status::latency(lat.avg, lat.target);
    let latency_trend = if latency_status.is_healthy() {
        (Direction::Up, format!("Under {}ms target", format_decimal(lat.target)))
    } else {
        (Direction::Down, format!("Over {}ms target", format_decimal(lat.target)))
    };

    let kpis = vec![
        KpiCard::new("Total Queries", format_count(summary.total_queries))
            .subtitle("Processed through rewriter")
            .tooltip(tooltips::TOTAL_QUERIES),
        KpiCard::new("Rewritten", format_count(summary.rewritten_count))
            .subtitle(format!("{} of queries", format_pct(summary.rewrite_rate)))
            .tooltip(tooltips::REWRITTEN)
            .variant(Variant::Info),
        KpiCard::new("Pass-through", format_count(summary.passthrough_count))
            .subtitle("No entities matched")
            .tooltip(tooltips::PASSTHROUGH),
        KpiCard::new("Avg Latency", format!("{}ms", format_decimal(lat.avg)))
            .trend(latency_trend.0, latency_trend.1)
            .tooltip(tooltips::AVG_LATENCY)
            .variant(latency_status.into()),
    ];

    let mut zero_rate_chart = ChartSeries::new("Zero-Result Rate Comparison", ChartKind::Bar, &["rate"]);
    zero_rate_chart.push("Rewritten", vec![eff.rewritten_zero_rate]);
    zero_rate_chart.push("Pass-through", vec![eff.passthrough_zero_rate]);

    let mut avg_results_chart =
        ChartSeries::new("Average Results per Query", ChartKind::Bar, &["results"]);
    avg_results_chart.push("Rewritten", vec![eff.rewritten_avg_results]);
    avg_results_chart.push("Pass-through", vec![eff.passthrough_avg_results]);

    let latency = LatencyPanel {
        min_ms: lat.min,
        max_ms: lat.max,
        avg_ms: lat.avg,
        p95_ms: lat.p95,
        target_ms: lat.target,
        budget_fill_pct: latency_budget_fill(lat.max, lat.target),
        badge: Badge::status(
            format!("{}ms / {}ms", format_decimal(lat.max), format_decimal(lat.target)),
            status::latency(lat.max, lat.target),
        ),
    };

    let total_matches = data.total_entity_matches();
    let entity_rows: Vec<EntityRow> = data
        .top_entities
        .iter()
        .map(|e| EntityRow {
            entity: e.entity.clone(),
            count: e.count,
            share_pct: share_pct(e.count, total_matches),
        })
        .collect();
    let entities = Limited::new(entity_rows, config.display.entity_limit);
    let entity_chart = ChartSeries::single(
        "Entity Distribution",
        ChartKind::Pie,
        "matches",
        entities.rows.iter().map(|e| (e.entity.clone(), e.count as f64)),
    );

    let query_filter = state.rewritten_query_filter();
    let rows: Vec<QueryRow> = apply_indexed(&data.rewritten_queries, &query_filter)
        .into_iter()
        .map(|(index, q)| query_row(index, q, state))
        .collect();

    let header = PageHeader::new(
        "Query Rewriter Performance",
        "Ontology-aware query expansion metrics",
    )
    .with_badge(Badge::new(
        format!("{} rewrite rate", format_pct(summary.rewrite_rate)),
        Variant::Success,
    ));

    RewriterPage {
        header,
        kpis,
        zero_rate_chart,
        avg_results_chart,
        improvement_percent: eff.improvement_percent,
        latency,
        quality: quality_panel(&data.quality_scores.rewritten, &data.quality_scores.passthrough),
        entities,
        entity_chart,
        head_to_head: data.head_to_head.as_ref().map(head_to_head_panel),
        queries: QueryTable {
            search: state.search.clone(),
            entity: query_filter.entity.as_str().to_string(),
            entity_options: filter::entity_options(&data.rewritten_queries),
            list: Limited::new(rows, config.display.rewritten_query_limit),
        },
    }
}
