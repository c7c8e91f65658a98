//! User feedback analysis.

use serde::Serialize;

use crate::config::schema::NexusConfig;
use crate::data::Datasets;
use crate::data::feedback::{FeedbackItem, Polarity};
use crate::filter::{self, ALL, apply_indexed};
use crate::metrics::derived::negative_share;
use crate::metrics::status;
use crate::view::ViewState;
use crate::view::components::{
    Badge, ChartKind, ChartSeries, KpiCard, Limited, RowKey, Variant, format_count, format_decimal,
    format_pct, tooltips,
};

use super::PageHeader;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackPage {
    pub header: PageHeader,
    pub kpis: Vec<KpiCard>,
    pub category_chart: ChartSeries,
    pub trend_chart: ChartSeries,
    pub filters: FeedbackFilters,
    pub items: Limited<FeedbackRow>,
}

/// Current filter selections plus the options to choose from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackFilters {
    pub search: String,
    pub category: String,
    pub polarity: String,
    pub category_options: Vec<String>,
    pub polarity_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRow {
    pub key: RowKey,
    pub comment: String,
    pub user_name: String,
    pub date: String,
    pub category: String,
    pub polarity: Polarity,
    pub badge: Badge,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FeedbackDetails>,
}

/// Extra fields shown when a row is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackDetails {
    pub full_comment: String,
    pub user_name: String,
    pub timestamp: String,
    pub conversation_id: String,
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn polarity_badge(polarity: Polarity) -> Badge {
    match polarity {
        Polarity::ThumbsUp => Badge::new("Positive", Variant::Success),
        Polarity::ThumbsDown => Badge::new("Negative", Variant::Danger),
        Polarity::Unknown => Badge::new("Unknown", Variant::Default),
    }
}

fn feedback_row(index: usize, item: &FeedbackItem, state: &ViewState) -> FeedbackRow {
    let key = RowKey::for_record(&item.id, index);
    let expanded = state.expanded.contains(&key);
    let user_name = or_placeholder(&item.user_name, "Anonymous");
    FeedbackRow {
        comment: or_placeholder(&item.comment, "No comment"),
        date: item.date_label(),
        category: item.category_label().to_string(),
        polarity: item.feedback_type,
        badge: polarity_badge(item.feedback_type),
        details: expanded.then(|| FeedbackDetails {
            full_comment: item.comment.clone(),
            user_name: user_name.clone(),
            timestamp: item.timestamp.clone(),
            conversation_id: or_placeholder(&item.conversation_id, "N/A"),
        }),
        user_name,
        expanded,
        key,
    }
}

pub fn build(datasets: &Datasets, config: &NexusConfig, state: &ViewState) -> FeedbackPage {
    let data = &datasets.feedback;
    let summary = &data.summary;

    let kpis = vec![
        KpiCard::new("Total Feedback", format_count(summary.total)).subtitle("All time"),
        KpiCard::new("Thumbs Up", format_count(summary.thumbs_up))
            .subtitle(format!("{} of total", format_pct(summary.positive_rate)))
            .tooltip(tooltips::POSITIVE_RATE)
            .variant(status::positive_rate(summary.positive_rate).into()),
        KpiCard::new("Thumbs Down", format_count(summary.thumbs_down))
            .subtitle(format!("{}% of total", format_decimal(negative_share(summary.positive_rate))))
            .variant(Variant::Danger),
        KpiCard::new("Categories", data.category_breakdown.len().to_string())
            .subtitle("AI-identified themes"),
    ];

    let category_chart = ChartSeries::single(
        "Feedback by Category",
        ChartKind::Pie,
        "count",
        data.category_breakdown
            .iter()
            .map(|c| (c.category.clone(), c.count as f64)),
    );

    let mut trend_chart = ChartSeries::new("Feedback Trend", ChartKind::Line, &["positive", "negative"]);
    for day in &data.trend {
        trend_chart.push(day.date.clone(), vec![day.positive as f64, day.negative as f64]);
    }

    let item_filter = state.feedback_filter();
    let rows: Vec<FeedbackRow> = apply_indexed(&data.feedback_items, &item_filter)
        .into_iter()
        .map(|(index, item)| feedback_row(index, item, state))
        .collect();

    FeedbackPage {
        header: PageHeader::new(
            "User Feedback Analysis",
            format!("{} feedback items analyzed", format_count(summary.total)),
        ),
        kpis,
        category_chart,
        trend_chart,
        filters: FeedbackFilters {
            search: state.search.clone(),
            category: item_filter.category.as_str().to_string(),
            polarity: item_filter.polarity.as_str(),
            category_options: filter::category_options(&data.feedback_items),
            polarity_options: vec![
                ALL.to_string(),
                Polarity::ThumbsUp.to_string(),
                Polarity::ThumbsDown.to_string(),
            ],
        },
        items: Limited::new(rows, config.display.feedback_limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::adoption::AdoptionMetrics;
    use crate::data::feedback::FeedbackMetrics;
    use crate::data::rewriter::RewriterMetrics;

    fn datasets(items: usize) -> Datasets {
        let mut feedback = FeedbackMetrics::default();
        feedback.summary.total = items as u64;
        feedback.summary.positive_rate = 66.7;
        feedback.feedback_items = (0..items)
            .map(|i| FeedbackItem {
                id: if i == 0 { String::new() } else { format!("fb-{i}") },
                comment: format!("comment {i}"),
                category: if i % 2 == 0 { "Capacity".into() } else { "Power".into() },
                feedback_type: if i % 3 == 0 { Polarity::ThumbsDown } else { Polarity::ThumbsUp },
                timestamp: "2025-01-15T09:30:00Z".into(),
                ..Default::default()
            })
            .collect();
        Datasets::from_parts(RewriterMetrics::default(), AdoptionMetrics::default(), feedback)
    }

    #[test]
    fn list_is_limited_with_note() {
        let page = build(&datasets(60), &NexusConfig::default(), &ViewState::default());
        assert_eq!(page.items.shown, 50);
        assert_eq!(page.items.total, 60);
        assert!(page.items.note.is_some());
    }

    #[test]
    fn thumbs_down_share_uses_one_decimal() {
        let page = build(&datasets(3), &NexusConfig::default(), &ViewState::default());
        assert_eq!(page.kpis[2].subtitle.as_deref(), Some("33.3% of total"));
    }

    #[test]
    fn filters_and_options() {
        let state = ViewState::from_query("category=Power&type=thumbsUp");
        let page = build(&datasets(6), &NexusConfig::default(), &state);
        // Power items are 1, 3, 5; item 3 is thumbs down.
        let keys: Vec<_> = page.items.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["fb-1", "fb-5"]);
        assert_eq!(page.filters.category_options, ["all", "Capacity", "Power"]);
        assert_eq!(page.filters.polarity, "thumbsUp");
    }

    #[test]
    fn expanded_row_shows_details_with_placeholders() {
        let state = ViewState::from_query("expanded=0");
        let page = build(&datasets(2), &NexusConfig::default(), &state);
        let row = &page.items.rows[0];
        assert_eq!(row.key.as_str(), "0");
        assert_eq!(row.date, "2025-01-15");
        let details = row.details.as_ref().expect("expanded details");
        assert_eq!(details.user_name, "Anonymous");
        assert_eq!(details.conversation_id, "N/A");
        assert!(page.items.rows[1].details.is_none());
    }
}
