//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a JSON [`Reply`].

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::schema::NexusConfig;
use crate::data::DatasetReport;
use crate::metrics::{self, Component, HealthStatus, Score};
use crate::view::ViewState;
use crate::view::pages;
use crate::view::route::{NavItem, Route, nav_items};

use super::{Dashboard, Reply};

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RoutesResponse {
    routes: Vec<NavItem>,
}

/// Scores API response: each score with its display value and breakdown.
#[derive(Serialize)]
struct ScoresResponse<'a> {
    scores: Vec<ScoreResponse<'a>>,
    overall: f64,
    overall_display: u8,
    status: HealthStatus,
    label: &'static str,
}

#[derive(Serialize)]
struct ScoreResponse<'a> {
    name: &'static str,
    value: f64,
    display: u8,
    breakdown: String,
    components: &'a [Component],
}

impl<'a> From<&'a Score> for ScoreResponse<'a> {
    fn from(score: &'a Score) -> Self {
        Self {
            name: score.name,
            value: score.value,
            display: score.display_value(),
            breakdown: score.breakdown(),
            components: &score.components,
        }
    }
}

#[derive(Serialize)]
struct DatasetsResponse<'a> {
    data_dir: PathBuf,
    loaded: usize,
    corrections: usize,
    reports: &'a [DatasetReport],
}

/// Effective configuration as JSON plus its TOML rendering.
#[derive(Serialize)]
struct ConfigResponse<'a> {
    config: &'a NexusConfig,
    toml_text: String,
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/routes`: the navigation table.
pub fn get_routes() -> Result<Reply> {
    Reply::json(&RoutesResponse {
        routes: nav_items(None),
    })
}

/// `GET /api/pages/<route>?q=&category=&type=&rewritten=&entity=&expanded=`
pub fn get_page(dashboard: &Dashboard, slug: &str, query: &str) -> Result<Reply> {
    let Some(route) = Route::from_slug(slug) else {
        return Ok(Reply::not_found());
    };
    let state = ViewState::from_query(query);
    let page = pages::build(route, &dashboard.datasets, &dashboard.config, &state);
    Reply::json(&page)
}

/// `GET /api/scores`: the three health scores and the overall label.
pub fn get_scores(dashboard: &Dashboard) -> Result<Reply> {
    let health = metrics::system_health(&dashboard.datasets, &dashboard.config.scoring);
    Reply::json(&ScoresResponse {
        scores: health.scores().into_iter().map(ScoreResponse::from).collect(),
        overall: health.overall,
        overall_display: health.overall_display(),
        status: health.status,
        label: health.status.label(),
    })
}

/// `GET /api/datasets`: where each dataset came from and what was corrected.
pub fn get_datasets(dashboard: &Dashboard) -> Result<Reply> {
    let datasets = &dashboard.datasets;
    Reply::json(&DatasetsResponse {
        data_dir: dashboard.config.data.resolved_dir(),
        loaded: datasets.loaded_count(),
        corrections: datasets.correction_count(),
        reports: &datasets.reports,
    })
}

/// `GET /api/config`: the effective configuration (read-only).
pub fn get_config(dashboard: &Dashboard) -> Result<Reply> {
    let toml_text =
        toml::to_string_pretty(&dashboard.config).context("failed to serialize config")?;
    Reply::json(&ConfigResponse {
        config: &dashboard.config,
        toml_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(reply: Reply) -> serde_json::Value {
        serde_json::from_slice(&reply.body).expect("json body")
    }

    #[test]
    fn routes_in_navigation_order() {
        let routes = body(get_routes().expect("routes"));
        let paths: Vec<_> = routes["routes"]
            .as_array()
            .expect("array")
            .iter()
            .map(|r| r["path"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            paths,
            ["/", "/adoption", "/feedback", "/query-rewriter", "/content-health"]
        );
    }

    #[test]
    fn scores_for_empty_datasets() {
        let scores = body(get_scores(&Dashboard::default()).expect("scores"));
        assert_eq!(scores["scores"].as_array().map(Vec::len), Some(3));
        // Zero latency scores 100 (weight 0.4) and content health is 100:
        // (40 + 0 + 100) / 3.
        assert_eq!(scores["overall_display"], 47);
        assert_eq!(scores["label"], "action required");
    }

    #[test]
    fn config_includes_toml_text() {
        let config = body(get_config(&Dashboard::default()).expect("config"));
        assert!(config["toml_text"].as_str().unwrap_or_default().contains("[scoring]"));
        assert_eq!(config["config"]["server"]["addr"], "127.0.0.1:9747");
    }
}
