//! Content health: zero-result queries and what to do about them.

use serde::Serialize;

use crate::config::schema::NexusConfig;
use crate::data::Datasets;
use crate::data::rewriter::ZeroResultQuery;
use crate::filter::apply_indexed;
use crate::metrics::{self, status};
use crate::view::ViewState;
use crate::view::components::{
    Badge, KpiCard, Limited, RowKey, ScoreBar, Variant, format_count, format_pct, tooltips,
};

use super::PageHeader;

/// Action for a gap where entities matched but the index had nothing.
pub const INDEX_GAP_ACTION: &str = "Content exists in ontology but not in index. Check if related documents need to be added to the knowledge base.";
/// Action for a gap where no entity matched at all.
pub const LEXICON_GAP_ACTION: &str =
    "No entities matched. Consider adding relevant terms to the ontology lexicon.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentHealthPage {
    pub header: PageHeader,
    pub kpis: Vec<KpiCard>,
    pub score: ScoreBar,
    pub score_display: u8,
    pub filters: GapFilters,
    pub gaps: Limited<GapRow>,
    /// Shown when filters leave nothing to list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapFilters {
    pub search: String,
    pub rewritten: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapRow {
    pub key: RowKey,
    pub query: String,
    pub was_rewritten: bool,
    pub mode: &'static str,
    pub entity_count: usize,
    pub badge: Badge,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<GapDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapDetails {
    pub full_query: String,
    pub matched_entities: Vec<String>,
    pub indexes_searched: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root_cause: String,
    pub recommended_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub text: &'static str,
    pub variant: Variant,
}

/// The four standing content improvement recommendations.
pub const RECOMMENDATIONS: [Recommendation; 4] = [
    Recommendation {
        title: "Expand Ontology",
        text: "Add missing terms to lexicon based on pass-through queries that returned zero results.",
        variant: Variant::Info,
    },
    Recommendation {
        title: "Update Indexes",
        text: "Add new documents or update existing content for queries where entities matched but no results were found.",
        variant: Variant::Success,
    },
    Recommendation {
        title: "Review Synonyms",
        text: "Check if existing entities need additional synonyms or variations to catch more queries.",
        variant: Variant::Warning,
    },
    Recommendation {
        title: "Out-of-Scope Detection",
        text: "Identify queries that are outside Nexus's domain and improve user guidance messaging.",
        variant: Variant::Danger,
    },
];

/// Recommended action for one zero-result query. A fix supplied by the
/// dataset wins over the generic text.
pub fn recommended_action(query: &ZeroResultQuery) -> String {
    if !query.recommended_fix.trim().is_empty() {
        query.recommended_fix.clone()
    } else if query.was_rewritten {
        INDEX_GAP_ACTION.to_string()
    } else {
        LEXICON_GAP_ACTION.to_string()
    }
}

fn gap_row(index: usize, query: &ZeroResultQuery, state: &ViewState) -> GapRow {
    let key = RowKey::for_record(&query.id, index);
    let expanded = state.expanded.contains(&key);
    let (mode, badge) = if query.was_rewritten {
        ("Rewritten", Badge::new("Expanded", Variant::Info))
    } else {
        ("Pass-through", Badge::new("No Match", Variant::Warning))
    };
    GapRow {
        query: if query.query.is_empty() {
            "No query".to_string()
        } else {
            query.query.clone()
        },
        was_rewritten: query.was_rewritten,
        mode,
        entity_count: query.matched_entities.len(),
        badge,
        details: expanded.then(|| GapDetails {
            full_query: query.query.clone(),
            matched_entities: query.matched_entities.clone(),
            indexes_searched: query.indexes_searched.clone(),
            root_cause: query.root_cause.clone(),
            recommended_action: recommended_action(query),
        }),
        expanded,
        key,
    }
}

pub fn build(datasets: &Datasets, config: &NexusConfig, state: &ViewState) -> ContentHealthPage {
    let data = &datasets.rewriter;
    let zero_rate = data.effectiveness.rewritten_zero_rate;
    let health = metrics::content_health(datasets);

    let kpis = vec![
        KpiCard::new("Zero-Result Queries", format_count(data.zero_result_queries.len() as u64))
            .subtitle("Total content gaps")
            .tooltip(tooltips::ZERO_RESULT_QUERIES),
        KpiCard::new("Rewritten Zeros", format_count(data.rewritten_zero_count() as u64))
            .subtitle("With entity expansion")
            .variant(Variant::Info),
        KpiCard::new("Pass-through Zeros", format_count(data.passthrough_zero_count() as u64))
            .subtitle("No entities matched")
            .variant(Variant::Warning),
        KpiCard::new("Zero Rate", format_pct(zero_rate))
            .subtitle("Rewritten queries")
            .tooltip(tooltips::REWRITTEN_ZERO_RATE)
            .variant(status::zero_rate(zero_rate).into()),
    ];

    let gap_filter = state.zero_result_filter();
    let rows: Vec<GapRow> = apply_indexed(&data.zero_result_queries, &gap_filter)
        .into_iter()
        .map(|(index, q)| gap_row(index, q, state))
        .collect();
    let gaps = Limited::new(rows, config.display.zero_result_limit);

    ContentHealthPage {
        header: PageHeader::new("Content Health", "Zero-result queries and content gaps")
            .with_badge(Badge::new(
                format!("{} gaps identified", data.zero_result_queries.len()),
                Variant::Warning,
            )),
        kpis,
        score: ScoreBar::new(health.name, health.value, 100.0),
        score_display: health.display_value(),
        filters: GapFilters {
            search: state.search.clone(),
            rewritten: gap_filter.rewritten.as_str(),
        },
        empty_message: (gaps.total == 0).then_some("No zero-result queries match your filters."),
        gaps,
        recommendations: RECOMMENDATIONS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::adoption::AdoptionMetrics;
    use crate::data::feedback::FeedbackMetrics;
    use crate::data::rewriter::RewriterMetrics;

    fn datasets() -> Datasets {
        let mut rewriter = RewriterMetrics::default();
        rewriter.summary.zero_result_rate = Some(8.3);
        rewriter.effectiveness.rewritten_zero_rate = 12.0;
        rewriter.zero_result_queries = vec![
            ZeroResultQuery {
                id: "z1".into(),
                query: "chiller loop pressure".into(),
                was_rewritten: true,
                matched_entities: vec!["Chiller".into()],
                ..Default::default()
            },
            ZeroResultQuery {
                id: "z2".into(),
                query: "badge office hours".into(),
                was_rewritten: false,
                ..Default::default()
            },
            ZeroResultQuery {
                id: "z3".into(),
                query: "generator fuel".into(),
                was_rewritten: false,
                recommended_fix: "Index the fuel logs".into(),
                ..Default::default()
            },
        ];
        Datasets::from_parts(rewriter, AdoptionMetrics::default(), FeedbackMetrics::default())
    }

    #[test]
    fn score_and_split_counts() {
        let page = build(&datasets(), &NexusConfig::default(), &ViewState::default());
        assert_eq!(page.score_display, 92);
        assert_eq!(page.kpis[0].value, "3");
        assert_eq!(page.kpis[1].value, "1");
        assert_eq!(page.kpis[2].value, "2");
        assert_eq!(page.kpis[3].variant, Variant::Success);
    }

    #[test]
    fn header_counts_every_gap_even_when_filtered() {
        let state = ViewState::from_query("rewritten=yes");
        let page = build(&datasets(), &NexusConfig::default(), &state);
        let badge = page.header.badge.expect("gap badge");
        assert_eq!(badge.label, "3 gaps identified");
        assert_eq!(badge.variant, Variant::Warning);
    }

    #[test]
    fn recommended_action_depends_on_rewrite_and_fix() {
        let data = datasets();
        let queries = &data.rewriter.zero_result_queries;
        assert_eq!(recommended_action(&queries[0]), INDEX_GAP_ACTION);
        assert_eq!(recommended_action(&queries[1]), LEXICON_GAP_ACTION);
        assert_eq!(recommended_action(&queries[2]), "Index the fuel logs");
    }

    #[test]
    fn rewritten_filter_and_expansion() {
        let state = ViewState::from_query("rewritten=no&expanded=z2");
        let page = build(&datasets(), &NexusConfig::default(), &state);
        assert_eq!(page.gaps.total, 2);
        assert_eq!(page.filters.rewritten, "no");
        let row = &page.gaps.rows[0];
        assert_eq!(row.badge.label, "No Match");
        assert_eq!(
            row.details.as_ref().map(|d| d.recommended_action.as_str()),
            Some(LEXICON_GAP_ACTION)
        );
        assert!(page.gaps.rows[1].details.is_none());
    }

    #[test]
    fn empty_result_shows_message() {
        let state = ViewState::from_query("q=nothing+matches+this");
        let page = build(&datasets(), &NexusConfig::default(), &state);
        assert_eq!(page.gaps.total, 0);
        assert!(page.empty_message.is_some());
        assert_eq!(page.recommendations.len(), 4);
    }
}
