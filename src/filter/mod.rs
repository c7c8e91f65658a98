//! List filtering and search.
//!
//! A filter is a set of predicates; a record passes when every active
//! predicate accepts it. Applying a filter is a single in-order scan that
//! returns the surviving records as a subsequence of the input, so it is
//! idempotent and an all-inactive filter returns the whole list.

use serde::{Deserialize, Serialize};

use crate::data::feedback::{FeedbackItem, Polarity};
use crate::data::rewriter::{RewrittenQuery, ZeroResultQuery};

/// Selection value meaning "no constraint".
pub const ALL: &str = "all";

/// Predicate over one record type.
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;

    /// True when no predicate is active.
    fn is_inactive(&self) -> bool;
}

/// Keep the records `filter` accepts, in their original order.
pub fn apply<'a, T, F: Filter<T>>(items: &'a [T], filter: &F) -> Vec<&'a T> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Like [`apply`], but returns `(index, record)` pairs so callers can fall
/// back to the array index as a row key.
pub fn apply_indexed<'a, T, F: Filter<T>>(items: &'a [T], filter: &F) -> Vec<(usize, &'a T)> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(item))
        .collect()
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Case-insensitive substring search. The needle is matched as typed,
/// surrounding spaces included; whitespace-only text matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchText {
    needle: String,
}

impl SearchText {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.needle.trim().is_empty()
    }

    pub fn matches(&self, haystack: &str) -> bool {
        !self.is_active() || haystack.to_lowercase().contains(&self.needle)
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }
}

/// Equality on a string field, or [`ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// `"all"` (any case) or blank means no constraint.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(v) => v,
        }
    }
}

/// Rewritten-flag selection for zero-result queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewrittenFilter {
    #[default]
    All,
    Yes,
    No,
}

impl RewrittenFilter {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "rewritten" => Self::Yes,
            "no" | "false" | "passthrough" | "pass-through" => Self::No,
            _ => Self::All,
        }
    }

    pub fn matches(self, was_rewritten: bool) -> bool {
        match self {
            Self::All => true,
            Self::Yes => was_rewritten,
            Self::No => !was_rewritten,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

/// Polarity selection for feedback items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolarityFilter {
    #[default]
    All,
    Only(Polarity),
}

impl PolarityFilter {
    pub fn parse(value: &str) -> Self {
        Polarity::parse(value).map_or(Self::All, Self::Only)
    }

    pub fn matches(self, polarity: Polarity) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == polarity,
        }
    }

    pub fn as_str(self) -> String {
        match self {
            Self::All => ALL.to_string(),
            Self::Only(p) => p.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record filters
// ---------------------------------------------------------------------------

/// Feedback list filter: comment search, category, and polarity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackFilter {
    pub search: SearchText,
    pub category: Selection,
    pub polarity: PolarityFilter,
}

impl Filter<FeedbackItem> for FeedbackFilter {
    fn matches(&self, item: &FeedbackItem) -> bool {
        self.polarity.matches(item.feedback_type)
            && self.category.matches(item.category_label())
            && self.search.matches(&item.comment)
    }

    fn is_inactive(&self) -> bool {
        !self.search.is_active() && !self.category.is_active() && self.polarity == PolarityFilter::All
    }
}

/// Zero-result list filter: query search and rewritten flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZeroResultFilter {
    pub search: SearchText,
    pub rewritten: RewrittenFilter,
}

impl Filter<ZeroResultQuery> for ZeroResultFilter {
    fn matches(&self, item: &ZeroResultQuery) -> bool {
        self.rewritten.matches(item.was_rewritten) && self.search.matches(&item.query)
    }

    fn is_inactive(&self) -> bool {
        !self.search.is_active() && self.rewritten == RewrittenFilter::All
    }
}

/// Rewritten-query table filter: query search and matched entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewrittenQueryFilter {
    pub search: SearchText,
    pub entity: Selection,
}

impl Filter<RewrittenQuery> for RewrittenQueryFilter {
    fn matches(&self, item: &RewrittenQuery) -> bool {
        let entity_ok = match &self.entity {
            Selection::All => true,
            Selection::Only(wanted) => item.matched_entities.iter().any(|e| e == wanted),
        };
        entity_ok && self.search.matches(&item.query)
    }

    fn is_inactive(&self) -> bool {
        !self.search.is_active() && !self.entity.is_active()
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Category dropdown options: `"all"` then each distinct category label in
/// first-seen order. Items without a category appear under the same label
/// their rows show.
pub fn category_options(items: &[FeedbackItem]) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for item in items {
        let label = item.category_label();
        if !options[1..].iter().any(|c| c == label) {
            options.push(label.to_string());
        }
    }
    options
}

/// Entity dropdown options for the rewritten-query table: `"all"` then each
/// matched entity in first-seen order.
pub fn entity_options(queries: &[RewrittenQuery]) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for entity in queries.iter().flat_map(|q| &q.matched_entities) {
        if !options[1..].contains(entity) {
            options.push(entity.clone());
        }
    }
    options
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feedback::UNCATEGORIZED;

    fn item(id: &str, comment: &str, category: &str, polarity: Polarity) -> FeedbackItem {
        FeedbackItem {
            id: id.to_string(),
            comment: comment.to_string(),
            category: category.to_string(),
            feedback_type: polarity,
            ..Default::default()
        }
    }

    fn sample() -> Vec<FeedbackItem> {
        vec![
            item("1", "UPS runtime answer was perfect", "Capacity", Polarity::ThumbsUp),
            item("2", "Wrong datacenter", "Connectivity", Polarity::ThumbsDown),
            item("3", "ups battery docs missing", "Capacity", Polarity::ThumbsDown),
            item("4", "Fast and accurate", "General Info", Polarity::ThumbsUp),
        ]
    }

    fn ids(items: &[&FeedbackItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn inactive_filter_returns_everything_in_order() {
        let items = sample();
        let filter = FeedbackFilter::default();
        assert!(filter.is_inactive());
        assert_eq!(ids(&apply(&items, &filter)), ["1", "2", "3", "4"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let items = sample();
        let filter = FeedbackFilter {
            search: SearchText::new("UPS"),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&items, &filter)), ["1", "3"]);
    }

    #[test]
    fn search_keeps_surrounding_spaces() {
        let items = vec![
            item("1", "upstream chiller valve", "Cooling", Polarity::ThumbsUp),
            item("2", "the ups battery", "Power", Polarity::ThumbsUp),
        ];
        let filter = FeedbackFilter {
            search: SearchText::new("ups "),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&items, &filter)), ["2"]);

        let blank = FeedbackFilter {
            search: SearchText::new("   "),
            ..Default::default()
        };
        assert!(blank.is_inactive());
        assert_eq!(ids(&apply(&items, &blank)), ["1", "2"]);
    }

    #[test]
    fn uncategorized_items_are_selectable_by_label() {
        let items = vec![
            item("1", "a", "", Polarity::ThumbsUp),
            item("2", "b", "Power", Polarity::ThumbsUp),
        ];
        let options = category_options(&items);
        assert_eq!(options, ["all", UNCATEGORIZED, "Power"]);

        let filter = FeedbackFilter {
            category: Selection::parse(&options[1]),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&items, &filter)), ["1"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let items = sample();
        let filter = FeedbackFilter {
            search: SearchText::new("ups"),
            category: Selection::parse("Capacity"),
            polarity: PolarityFilter::parse("thumbsDown"),
        };
        assert_eq!(ids(&apply(&items, &filter)), ["3"]);
    }

    #[test]
    fn selection_all_is_case_insensitive() {
        assert_eq!(Selection::parse("ALL"), Selection::All);
        assert_eq!(Selection::parse(""), Selection::All);
        assert!(Selection::parse("Capacity").is_active());
    }

    #[test]
    fn zero_result_filter_by_flag() {
        let queries = vec![
            ZeroResultQuery { id: "a".into(), query: "chiller loop".into(), was_rewritten: true, ..Default::default() },
            ZeroResultQuery { id: "b".into(), query: "badge access".into(), was_rewritten: false, ..Default::default() },
        ];
        let yes = ZeroResultFilter { rewritten: RewrittenFilter::Yes, ..Default::default() };
        let no = ZeroResultFilter { rewritten: RewrittenFilter::parse("no"), ..Default::default() };
        assert_eq!(apply(&queries, &yes)[0].id, "a");
        assert_eq!(apply(&queries, &no)[0].id, "b");
    }

    #[test]
    fn rewritten_query_filter_by_entity() {
        let queries = vec![
            RewrittenQuery { id: "q1".into(), query: "ups fault".into(), matched_entities: vec!["UPS".into()], ..Default::default() },
            RewrittenQuery { id: "q2".into(), query: "pdu load".into(), matched_entities: vec!["PDU".into()], ..Default::default() },
        ];
        let filter = RewrittenQueryFilter { entity: Selection::parse("PDU"), ..Default::default() };
        let out = apply(&queries, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "q2");
    }

    #[test]
    fn indexed_apply_keeps_original_positions() {
        let items = sample();
        let filter = FeedbackFilter {
            polarity: PolarityFilter::Only(Polarity::ThumbsUp),
            ..Default::default()
        };
        let out: Vec<usize> = apply_indexed(&items, &filter).into_iter().map(|(i, _)| i).collect();
        assert_eq!(out, [0, 3]);
    }

    #[test]
    fn category_options_first_seen_order() {
        let items = sample();
        assert_eq!(
            category_options(&items),
            ["all", "Capacity", "Connectivity", "General Info"]
        );
    }
}
