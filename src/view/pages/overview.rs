//! Overview: headline numbers from every dataset plus the health scores.

use serde::Serialize;

use crate::config::schema::NexusConfig;
use crate::data::Datasets;
use crate::metrics::{self, HealthStatus, Score, SystemHealth, status};
use crate::view::components::{
    Badge, KpiCard, ScoreBar, StatRow, Variant, format_count, format_decimal, format_pct,
};
use crate::view::route::{NavItem, Route, nav_items};

use super::PageHeader;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewPage {
    pub header: PageHeader,
    pub quick_stats: Vec<KpiCard>,
    pub sections: Vec<SectionCard>,
    pub health: HealthPanel,
    pub quick_links: Vec<NavItem>,
}

/// Summary card linking to one detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCard {
    pub title: &'static str,
    pub route: Route,
    pub rows: Vec<StatRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreView {
    pub name: &'static str,
    pub value: u8,
    pub bar: ScoreBar,
    pub breakdown: String,
}

impl From<&Score> for ScoreView {
    fn from(score: &Score) -> Self {
        Self {
            name: score.name,
            value: score.display_value(),
            bar: ScoreBar::new(score.name, score.value, 100.0),
            breakdown: score.breakdown(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthPanel {
    pub scores: Vec<ScoreView>,
    pub overall: u8,
    pub status: HealthStatus,
    pub badge: Badge,
}

impl From<&SystemHealth> for HealthPanel {
    fn from(health: &SystemHealth) -> Self {
        Self {
            scores: health.scores().into_iter().map(ScoreView::from).collect(),
            overall: health.overall_display(),
            status: health.status,
            badge: Badge::status(health.status.label(), health.status.status()),
        }
    }
}

pub fn build(datasets: &Datasets, config: &NexusConfig) -> OverviewPage {
    let rewriter = &datasets.rewriter;
    let adoption = &datasets.adoption;
    let feedback = &datasets.feedback;
    let health = metrics::system_health(datasets, &config.scoring);

    let quick_stats = vec![
        KpiCard::new("Total Queries", format_count(adoption.total_queries)).subtitle("Production"),
        KpiCard::new("Active Users", format_count(adoption.mau))
            .subtitle("Monthly")
            .variant(Variant::Info),
        KpiCard::new("Feedback", format_pct(feedback.summary.positive_rate))
            .subtitle("Positive")
            .variant(status::positive_rate(feedback.summary.positive_rate).into()),
        KpiCard::new("Rewrite Rate", format_pct(rewriter.summary.rewrite_rate))
            .subtitle("Queries expanded"),
    ];

    let sections = vec![
        SectionCard {
            title: "Query Rewriter",
            route: Route::QueryRewriter,
            rows: vec![
                StatRow::new("Total Processed", format_count(rewriter.summary.total_queries)),
                StatRow::new("Rewritten", format_count(rewriter.summary.rewritten_count)),
                StatRow::new("Pass-through", format_count(rewriter.summary.passthrough_count)),
                StatRow::badge(
                    "Avg Latency",
                    Badge::status(
                        format!("{}ms", format_decimal(rewriter.latency_stats.avg)),
                        status::latency(rewriter.latency_stats.avg, rewriter.latency_stats.target),
                    ),
                ),
            ],
        },
        SectionCard {
            title: "Adoption",
            route: Route::Adoption,
            rows: vec![
                StatRow::new("WAU", format_count(adoption.wau)),
                StatRow::new("MAU", format_count(adoption.mau)),
                StatRow::badge(
                    "Stickiness",
                    Badge::status(format_pct(adoption.stickiness), status::stickiness(adoption.stickiness)),
                ),
                StatRow::new("Queries/User", format_decimal(adoption.queries_per_user)),
            ],
        },
        SectionCard {
            title: "Feedback",
            route: Route::Feedback,
            rows: vec![
                StatRow::new("Total", format_count(feedback.summary.total)),
                StatRow::new("Thumbs Up", format_count(feedback.summary.thumbs_up)),
                StatRow::new("Thumbs Down", format_count(feedback.summary.thumbs_down)),
                StatRow::badge(
                    "Positive Rate",
                    Badge::status(
                        format_pct(feedback.summary.positive_rate),
                        status::positive_rate(feedback.summary.positive_rate),
                    ),
                ),
            ],
        },
    ];

    OverviewPage {
        header: PageHeader::new("Dashboard Overview", "Key metrics across all Nexus analytics"),
        quick_stats,
        sections,
        health: HealthPanel::from(&health),
        quick_links: nav_items(None)
            .into_iter()
            .filter(|item| item.route != Route::Overview)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::adoption::AdoptionMetrics;
    use crate::data::feedback::FeedbackMetrics;
    use crate::data::rewriter::RewriterMetrics;

    #[test]
    fn empty_datasets_render_zeros() {
        let page = build(&Datasets::default(), &NexusConfig::default());
        assert_eq!(page.quick_stats.len(), 4);
        assert_eq!(page.quick_stats[0].value, "0");
        assert_eq!(page.sections.len(), 3);
        assert_eq!(page.health.scores.len(), 3);
        // Content health is 100 with no zero-result queries.
        assert_eq!(page.health.scores[2].value, 100);
    }

    #[test]
    fn quick_links_skip_overview() {
        let page = build(&Datasets::default(), &NexusConfig::default());
        assert_eq!(page.quick_links.len(), 4);
        assert!(page.quick_links.iter().all(|l| l.route != Route::Overview));
    }

    #[test]
    fn badges_follow_thresholds() {
        let mut adoption = AdoptionMetrics::default();
        adoption.stickiness = 30.0;
        let mut feedback = FeedbackMetrics::default();
        feedback.summary.positive_rate = 40.0;
        let datasets = Datasets::from_parts(RewriterMetrics::default(), adoption, feedback);

        let page = build(&datasets, &NexusConfig::default());
        let stickiness = &page.sections[1].rows[2];
        assert_eq!(stickiness.badge.as_ref().map(|b| b.variant), Some(Variant::Success));
        let positive = &page.sections[2].rows[3];
        assert_eq!(positive.badge.as_ref().map(|b| b.variant), Some(Variant::Danger));
    }
}
