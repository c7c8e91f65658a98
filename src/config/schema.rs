/// Configuration schema and defaults for nexusiq.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[data]`, `[server]`, `[scoring]`, and `[display]`.
///
/// Every field has a built-in default. Users only need to set the values they
/// want to override.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level nexusiq configuration.
///
/// Maps directly to `~/.nexusiq/config.toml` and `.nexusiq.toml`. All
/// sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NexusConfig {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub scoring: ScoringConfig,
    pub display: DisplayConfig,
}

// ---------------------------------------------------------------------------
// [data]
// ---------------------------------------------------------------------------

/// Where the three dataset files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the dataset files. `~` is expanded.
    pub dir: String,
    pub rewriter_file: String,
    pub adoption_file: String,
    pub feedback_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
            rewriter_file: "data.json".to_string(),
            adoption_file: "adoption.json".to_string(),
            feedback_file: "feedback.json".to_string(),
        }
    }
}

impl DataConfig {
    /// The data directory with a leading `~` expanded to the home directory.
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(rest) = self.dir.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(&self.dir)
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for `nexusiq serve`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [scoring]
// ---------------------------------------------------------------------------

/// Weights and normalization caps for the derived health scores.
///
/// The defaults reproduce the dashboard's published formulas exactly. They
/// are policy values, not derived quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Query performance: weight of the latency component.
    pub latency_weight: f64,
    /// Query performance: weight of the rewrite (match) rate.
    pub match_rate_weight: f64,
    /// Query performance: weight of the answer quality component.
    pub quality_weight: f64,
    /// Average latency (ms) at or below which the latency score is 100.
    pub latency_floor_ms: f64,
    /// Milliseconds above the floor over which the latency score falls to 0.
    pub latency_span_ms: f64,

    /// User adoption: weight of the stickiness component.
    pub stickiness_weight: f64,
    /// User adoption: weight of the positive feedback rate.
    pub feedback_weight: f64,
    /// User adoption: weight of the WAU component.
    pub wau_weight: f64,
    /// Stickiness percentage that maps to a full score.
    pub stickiness_cap: f64,
    /// Weekly active users that map to a full score.
    pub wau_cap: f64,

    /// Overall health at or above this is "healthy".
    pub healthy_threshold: f64,
    /// Overall health at or above this (and below healthy) needs attention.
    pub attention_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            latency_weight: 0.4,
            match_rate_weight: 0.3,
            quality_weight: 0.3,
            latency_floor_ms: 10.0,
            latency_span_ms: 90.0,
            stickiness_weight: 0.4,
            feedback_weight: 0.3,
            wau_weight: 0.3,
            stickiness_cap: 50.0,
            wau_cap: 150.0,
            healthy_threshold: 70.0,
            attention_threshold: 50.0,
        }
    }
}

// ---------------------------------------------------------------------------
// [display]
// ---------------------------------------------------------------------------

/// Maximum rows shown per list before the "showing N of M" note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub feedback_limit: usize,
    pub zero_result_limit: usize,
    pub rewritten_query_limit: usize,
    pub entity_limit: usize,
    pub top_user_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            feedback_limit: 50,
            zero_result_limit: 30,
            rewritten_query_limit: 20,
            entity_limit: 8,
            top_user_limit: 7,
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl NexusConfig {
    /// Generate the annotated default TOML config file content.
    ///
    /// Used by `nexusiq config init` to write a commented starting point.
    pub fn default_toml() -> String {
        r#"# nexusiq Configuration
# Query optimizer observability dashboard
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (NEXUSIQ_*)
#   2. Project config (.nexusiq.toml in current directory)
#   3. User global config (~/.nexusiq/config.toml)
#   4. Built-in defaults

[data]
dir = "data"                    # or NEXUSIQ_DATA_DIR
rewriter_file = "data.json"
adoption_file = "adoption.json"
feedback_file = "feedback.json"

[server]
addr = "127.0.0.1:9747"         # or NEXUSIQ_ADDR
open_browser = true

# Derived score policy. Changing these changes every published score.
[scoring]
latency_weight = 0.4
match_rate_weight = 0.3
quality_weight = 0.3
latency_floor_ms = 10.0
latency_span_ms = 90.0
stickiness_weight = 0.4
feedback_weight = 0.3
wau_weight = 0.3
stickiness_cap = 50.0
wau_cap = 150.0
healthy_threshold = 70.0
attention_threshold = 50.0

[display]
feedback_limit = 50
zero_result_limit = 30
rewritten_query_limit = 20
entity_limit = 8
top_user_limit = 7
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_parses_to_defaults() {
        let parsed: NexusConfig = toml::from_str(&NexusConfig::default_toml()).unwrap();
        assert_eq!(parsed, NexusConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let parsed: NexusConfig = toml::from_str(
            r#"
[scoring]
wau_cap = 200.0
"#,
        )
        .unwrap();
        assert_eq!(parsed.scoring.wau_cap, 200.0);
        assert_eq!(parsed.scoring.stickiness_cap, 50.0);
        assert_eq!(parsed.server.addr, "127.0.0.1:9747");
    }

    #[test]
    fn scoring_weights_sum_to_one() {
        let s = ScoringConfig::default();
        assert!((s.latency_weight + s.match_rate_weight + s.quality_weight - 1.0).abs() < 1e-9);
        assert!((s.stickiness_weight + s.feedback_weight + s.wau_weight - 1.0).abs() < 1e-9);
    }

    #[test]
    fn resolved_dir_keeps_relative_paths() {
        let data = DataConfig::default();
        assert_eq!(data.resolved_dir(), PathBuf::from("data"));
    }

    #[test]
    fn resolved_dir_expands_home() {
        let data = DataConfig {
            dir: "~/dashboards".to_string(),
            ..Default::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(data.resolved_dir(), home.join("dashboards"));
        }
    }
}
