//! Threshold classification.
//!
//! Every place the dashboard colors or labels a number by a threshold goes
//! through one of these functions, so the business cut-offs live here and
//! the rendering layer only maps [`Status`] to a badge.

use std::fmt;

use serde::Serialize;

use crate::config::schema::ScoringConfig;

/// Stickiness above this is on target.
pub const STICKINESS_TARGET_PCT: f64 = 25.0;
/// Positive feedback above this is healthy.
pub const POSITIVE_RATE_TARGET_PCT: f64 = 50.0;
/// Average end-to-end response time below this is good.
pub const RESPONSE_TIME_TARGET_MS: f64 = 10_000.0;
/// Zero-result rate for rewritten queries below this is good.
pub const ZERO_RATE_TARGET_PCT: f64 = 20.0;
/// Per-query rewrite time below this is fast.
pub const FAST_REWRITE_MS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Healthy,
    Warning,
    Critical,
}

impl Status {
    pub fn is_healthy(self) -> bool {
        self == Self::Healthy
    }
}

/// Stickiness (%) against the 25 % target.
pub fn stickiness(pct: f64) -> Status {
    if pct > STICKINESS_TARGET_PCT {
        Status::Healthy
    } else {
        Status::Warning
    }
}

/// Positive feedback rate (%): at or below half is critical.
pub fn positive_rate(pct: f64) -> Status {
    if pct > POSITIVE_RATE_TARGET_PCT {
        Status::Healthy
    } else {
        Status::Critical
    }
}

pub fn response_time(avg_ms: f64) -> Status {
    if avg_ms < RESPONSE_TIME_TARGET_MS {
        Status::Healthy
    } else {
        Status::Warning
    }
}

/// Zero-result rate (%) of rewritten queries.
pub fn zero_rate(pct: f64) -> Status {
    if pct < ZERO_RATE_TARGET_PCT {
        Status::Healthy
    } else {
        Status::Critical
    }
}

pub fn rewrite_time(ms: f64) -> Status {
    if ms < FAST_REWRITE_MS {
        Status::Healthy
    } else {
        Status::Warning
    }
}

/// Average rewrite latency against its budget.
pub fn latency(avg_ms: f64, target_ms: f64) -> Status {
    if avg_ms <= target_ms {
        Status::Healthy
    } else {
        Status::Warning
    }
}

// ---------------------------------------------------------------------------
// Overall health label
// ---------------------------------------------------------------------------

/// Label for the overall system health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    NeedsAttention,
    ActionRequired,
}

impl HealthStatus {
    pub fn classify(overall: f64, cfg: &ScoringConfig) -> Self {
        if overall >= cfg.healthy_threshold {
            Self::Healthy
        } else if overall >= cfg.attention_threshold {
            Self::NeedsAttention
        } else {
            Self::ActionRequired
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::NeedsAttention => "needs attention",
            Self::ActionRequired => "action required",
        }
    }

    pub fn status(self) -> Status {
        match self {
            Self::Healthy => Status::Healthy,
            Self::NeedsAttention => Status::Warning,
            Self::ActionRequired => Status::Critical,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stickiness_threshold_is_exclusive() {
        assert_eq!(stickiness(25.0), Status::Warning);
        assert_eq!(stickiness(25.1), Status::Healthy);
    }

    #[test]
    fn positive_rate_threshold() {
        assert_eq!(positive_rate(50.0), Status::Critical);
        assert_eq!(positive_rate(66.7), Status::Healthy);
    }

    #[test]
    fn response_and_rewrite_times() {
        assert_eq!(response_time(9_999.0), Status::Healthy);
        assert_eq!(response_time(10_000.0), Status::Warning);
        assert_eq!(rewrite_time(4.9), Status::Healthy);
        assert_eq!(rewrite_time(5.0), Status::Warning);
    }

    #[test]
    fn zero_rate_and_latency() {
        assert_eq!(zero_rate(19.9), Status::Healthy);
        assert_eq!(zero_rate(20.0), Status::Critical);
        assert_eq!(latency(40.0, 40.0), Status::Healthy);
        assert_eq!(latency(41.0, 40.0), Status::Warning);
    }

    #[test]
    fn health_status_thresholds() {
        let cfg = ScoringConfig::default();
        assert_eq!(HealthStatus::classify(70.0, &cfg), HealthStatus::Healthy);
        assert_eq!(HealthStatus::classify(69.9, &cfg), HealthStatus::NeedsAttention);
        assert_eq!(HealthStatus::classify(50.0, &cfg), HealthStatus::NeedsAttention);
        assert_eq!(HealthStatus::classify(49.9, &cfg), HealthStatus::ActionRequired);
        assert_eq!(HealthStatus::ActionRequired.to_string(), "action required");
    }
}
