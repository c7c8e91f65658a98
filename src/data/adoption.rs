//! Production adoption metrics (`adoption.json`).

use serde::{Deserialize, Serialize};

use super::{Correction, Dataset, Metadata, Sanitize, clamp_field, clamp_non_negative, clamp_pct};

/// Weekly/monthly usage, stickiness, and volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdoptionMetrics {
    pub wau: u64,
    pub mau: u64,
    /// WAU / MAU as a percentage.
    pub stickiness: f64,
    pub total_queries: u64,
    pub total_users: u64,
    pub queries_per_user: f64,
    pub avg_response_time_ms: f64,
    /// Hour of day (0–23) with the most queries.
    pub peak_hour: u32,
    pub query_trend: Vec<DailyCount>,
    /// Ranked by query volume, highest first.
    pub top_users: Vec<UserVolume>,
    pub metadata: Metadata,
}

impl Dataset for AdoptionMetrics {
    const NAME: &'static str = "adoption";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserVolume {
    pub user: String,
    pub queries: u64,
}

impl AdoptionMetrics {
    /// The day with the highest query count, if any.
    pub fn busiest_day(&self) -> Option<&DailyCount> {
        self.query_trend.iter().max_by_key(|d| d.count)
    }
}

impl Sanitize for AdoptionMetrics {
    fn sanitize(&mut self) -> Vec<Correction> {
        let mut out = Vec::new();

        clamp_pct(&mut self.stickiness, "stickiness", &mut out);
        clamp_non_negative(&mut self.queries_per_user, "queriesPerUser", &mut out);
        clamp_non_negative(&mut self.avg_response_time_ms, "avgResponseTimeMs", &mut out);

        if self.peak_hour > 23 {
            let mut hour = f64::from(self.peak_hour);
            clamp_field(&mut hour, 0.0, 23.0, "peakHour", &mut out);
            self.peak_hour = 23;
        }

        // Ranked list: restore descending order if the producer did not.
        if !self.top_users.is_sorted_by(|a, b| a.queries >= b.queries) {
            self.top_users.sort_by(|a, b| b.queries.cmp(&a.queries));
        }

        out
    }
}
