//! User feedback metrics (`feedback.json`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Correction, Dataset, Metadata, Sanitize, clamp_pct};

/// Category label used when an item carries none.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackMetrics {
    pub summary: FeedbackSummary,
    pub category_breakdown: Vec<CategoryCount>,
    pub trend: Vec<DailyPolarity>,
    pub feedback_items: Vec<FeedbackItem>,
    pub metadata: Metadata,
}

impl Dataset for FeedbackMetrics {
    const NAME: &'static str = "feedback";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackSummary {
    pub total: u64,
    pub thumbs_up: u64,
    pub thumbs_down: u64,
    /// Thumbs-up share of all feedback, as a percentage.
    pub positive_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyPolarity {
    pub date: String,
    pub positive: u64,
    pub negative: u64,
}

/// Thumbs up / thumbs down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    ThumbsUp,
    ThumbsDown,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Polarity {
    /// Parse the wire name (`thumbsUp` / `thumbsDown`), case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thumbsup" | "up" | "positive" => Some(Self::ThumbsUp),
            "thumbsdown" | "down" | "negative" => Some(Self::ThumbsDown),
            _ => None,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Self::ThumbsUp
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThumbsUp => write!(f, "thumbsUp"),
            Self::ThumbsDown => write!(f, "thumbsDown"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One piece of user feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackItem {
    pub id: String,
    pub comment: String,
    pub user_name: String,
    /// RFC 3339 timestamp as produced upstream.
    pub timestamp: String,
    pub category: String,
    pub feedback_type: Polarity,
    pub conversation_id: String,
}

impl FeedbackItem {
    /// Category for display, falling back to [`UNCATEGORIZED`].
    pub fn category_label(&self) -> &str {
        if self.category.is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }

    /// Calendar date of the timestamp, or the raw string if it does not parse.
    pub fn date_label(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| self.timestamp.get(..10).unwrap_or(self.timestamp.as_str()).to_string())
    }
}

impl Sanitize for FeedbackMetrics {
    fn sanitize(&mut self) -> Vec<Correction> {
        let mut out = Vec::new();
        clamp_pct(&mut self.summary.positive_rate, "summary.positiveRate", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_dataset;

    #[test]
    fn items_parse_with_polarity() {
        let json = r#"{
            "summary": {"total": 3, "thumbsUp": 2, "thumbsDown": 1, "positiveRate": 66.7},
            "feedbackItems": [
                {"id": "f1", "comment": "Great answer", "feedbackType": "thumbsUp", "category": "Capacity"},
                {"id": "f2", "comment": "Wrong site", "feedbackType": "thumbsDown"},
                {"id": "f3", "feedbackType": "meh"}
            ]
        }"#;
        let data: FeedbackMetrics = parse_dataset(json).unwrap();
        assert_eq!(data.summary.thumbs_up, 2);
        assert_eq!(data.feedback_items[0].feedback_type, Polarity::ThumbsUp);
        assert_eq!(data.feedback_items[1].category_label(), UNCATEGORIZED);
        assert_eq!(data.feedback_items[2].feedback_type, Polarity::Unknown);
    }

    #[test]
    fn polarity_parse_variants() {
        assert_eq!(Polarity::parse("thumbsUp"), Some(Polarity::ThumbsUp));
        assert_eq!(Polarity::parse("THUMBSDOWN"), Some(Polarity::ThumbsDown));
        assert_eq!(Polarity::parse("down"), Some(Polarity::ThumbsDown));
        assert_eq!(Polarity::parse("all"), None);
    }

    #[test]
    fn date_label_formats_rfc3339() {
        let item = FeedbackItem {
            timestamp: "2025-01-15T10:05:00+00:00".to_string(),
            ..Default::default()
        };
        assert_eq!(item.date_label(), "2025-01-15");

        let odd = FeedbackItem {
            timestamp: "2025-01-15 10:05".to_string(),
            ..Default::default()
        };
        assert_eq!(odd.date_label(), "2025-01-15");
    }
}
