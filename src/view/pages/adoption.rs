//! Adoption & engagement.

use serde::Serialize;

use crate::config::schema::NexusConfig;
use crate::data::Datasets;
use crate::metrics::derived::{seconds, share_pct};
use crate::metrics::status;
use crate::view::components::{
    Badge, ChartKind, ChartSeries, Direction, KpiCard, Limited, StatRow, Variant, format_count,
    format_decimal, format_pct, tooltips,
};

use super::PageHeader;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionPage {
    pub header: PageHeader,
    pub kpis: Vec<KpiCard>,
    pub trend_chart: ChartSeries,
    pub peak_hour: Badge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_day: Option<StatRow>,
    pub response_time: ResponseTimePanel,
    pub top_users: Limited<UserRow>,
    pub usage_summary: Vec<StatRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTimePanel {
    pub seconds: f64,
    pub millis: f64,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRow {
    pub rank: usize,
    pub user: String,
    pub queries: u64,
    /// Share of all production queries.
    pub share_pct: f64,
}

fn hour_label(hour: u32) -> String {
    format!("{hour}:00")
}

pub fn build(datasets: &Datasets, config: &NexusConfig) -> AdoptionPage {
    let data = &datasets.adoption;

    let stickiness = status::stickiness(data.stickiness);
    let (direction, trend_label) = if stickiness.is_healthy() {
        (Direction::Up, "Above 25% target")
    } else {
        (Direction::Down, "Below 25% target")
    };

    let kpis = vec![
        KpiCard::new("Weekly Active Users", format_count(data.wau)).subtitle("Last 7 days"),
        KpiCard::new("Monthly Active Users", format_count(data.mau)).subtitle("Last 30 days"),
        KpiCard::new("Stickiness", format_pct(data.stickiness))
            .subtitle("WAU / MAU ratio")
            .trend(direction, trend_label)
            .tooltip(tooltips::STICKINESS)
            .variant(stickiness.into()),
        KpiCard::new("Queries per User", format_decimal(data.queries_per_user))
            .subtitle(format!("{} total users", format_count(data.total_users))),
    ];

    let trend_chart = ChartSeries::single(
        "Daily Query Volume",
        ChartKind::Bar,
        "queries",
        data.query_trend.iter().map(|d| (d.date.clone(), d.count as f64)),
    );

    let response_status = status::response_time(data.avg_response_time_ms);
    let response_time = ResponseTimePanel {
        seconds: seconds(data.avg_response_time_ms),
        millis: data.avg_response_time_ms,
        badge: Badge::status(
            if response_status.is_healthy() {
                "Good"
            } else {
                "Needs Improvement"
            },
            response_status,
        ),
    };

    let users: Vec<UserRow> = data
        .top_users
        .iter()
        .enumerate()
        .map(|(i, u)| UserRow {
            rank: i + 1,
            user: u.user.clone(),
            queries: u.queries,
            share_pct: share_pct(u.queries, data.total_queries),
        })
        .collect();

    let avg_seconds = format!("{}s", format_decimal(seconds(data.avg_response_time_ms)));
    let usage_summary = vec![
        StatRow::new("Total Queries", format_count(data.total_queries)),
        StatRow::new("Total Users", format_count(data.total_users)),
        StatRow::new("Peak Hour", hour_label(data.peak_hour)),
        StatRow::new("Avg Response", avg_seconds),
    ];

    AdoptionPage {
        header: PageHeader::new(
            "Adoption & Engagement",
            format!(
                "Production usage metrics from {} total queries",
                format_count(data.total_queries)
            ),
        ),
        kpis,
        trend_chart,
        peak_hour: Badge::new(format!("Peak hour: {}", hour_label(data.peak_hour)), Variant::Default),
        busiest_day: data
            .busiest_day()
            .map(|d| StatRow::new("Busiest Day", format!("{} ({})", d.date, format_count(d.count)))),
        response_time,
        top_users: Limited::new(users, config.display.top_user_limit),
        usage_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::adoption::{AdoptionMetrics, DailyCount, UserVolume};
    use crate::data::feedback::FeedbackMetrics;
    use crate::data::rewriter::RewriterMetrics;

    fn datasets() -> Datasets {
        let adoption = AdoptionMetrics {
            wau: 120,
            mau: 400,
            stickiness: 30.0,
            total_queries: 1_000,
            total_users: 400,
            queries_per_user: 2.5,
            avg_response_time_ms: 8_412.0,
            peak_hour: 14,
            query_trend: vec![
                DailyCount { date: "2025-01-01".into(), count: 30 },
                DailyCount { date: "2025-01-02".into(), count: 55 },
            ],
            top_users: (0..10)
                .map(|i| UserVolume { user: format!("user{i}"), queries: 100 - i * 5 })
                .collect(),
            ..Default::default()
        };
        Datasets::from_parts(RewriterMetrics::default(), adoption, FeedbackMetrics::default())
    }

    #[test]
    fn response_time_in_seconds() {
        let page = build(&datasets(), &NexusConfig::default());
        assert_eq!(page.response_time.seconds, 8.4);
        assert_eq!(page.response_time.badge.label, "Good");
        assert_eq!(page.usage_summary[3].value, "8.4s");
    }

    #[test]
    fn top_users_are_ranked_and_limited() {
        let page = build(&datasets(), &NexusConfig::default());
        assert_eq!(page.top_users.shown, 7);
        assert_eq!(page.top_users.total, 10);
        assert_eq!(page.top_users.rows[0].rank, 1);
        assert_eq!(page.top_users.rows[0].user, "user0");
        assert!((page.top_users.rows[0].share_pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn peak_hour_and_busiest_day() {
        let page = build(&datasets(), &NexusConfig::default());
        assert_eq!(page.peak_hour.label, "Peak hour: 14:00");
        assert_eq!(
            page.busiest_day.map(|r| r.value),
            Some("2025-01-02 (55)".to_string())
        );
    }

    #[test]
    fn stickiness_card_reflects_target() {
        let page = build(&datasets(), &NexusConfig::default());
        assert_eq!(page.kpis[2].variant, Variant::Success);
        assert_eq!(page.kpis[2].value, "30%");
    }
}
