//! View models for the dashboard pages.
//!
//! A page is built from the loaded [`Datasets`](crate::data::Datasets), the
//! effective configuration, and a [`ViewState`]: the search text, filter
//! selections, and expanded rows of one request. The same inputs always
//! produce the same page.

pub mod components;
pub mod pages;
pub mod route;

use crate::filter::{
    FeedbackFilter, PolarityFilter, RewrittenFilter, RewrittenQueryFilter, SearchText, Selection,
    ZeroResultFilter,
};

use components::{ExpandedRows, RowKey};

/// Per-request UI state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub search: String,
    pub category: String,
    /// Feedback polarity selection (`thumbsUp`, `thumbsDown`, `all`).
    pub polarity: String,
    /// Zero-result rewritten flag (`yes`, `no`, `all`).
    pub rewritten: String,
    pub entity: String,
    pub expanded: ExpandedRows,
}

impl ViewState {
    /// Parse `q`, `category`, `type`, `rewritten`, `entity`, and `expanded`
    /// from a URL query string. Unknown keys are ignored.
    ///
    /// `expanded` is a comma-separated list whose items are themselves
    /// percent-encoded, so a key containing a comma arrives as `%2C` inside
    /// the already-decoded value.
    pub fn from_query(query: &str) -> Self {
        let mut state = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                state.set(key, decode_component(value));
            }
        }
        state
    }

    /// Build from already-decoded `(key, value)` pairs, e.g. CLI flags.
    /// `None` values leave the default in place.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, Option<String>)>) -> Self {
        let mut state = Self::default();
        for (key, value) in pairs {
            if let Some(value) = value {
                state.set(key, value);
            }
        }
        state
    }

    fn set(&mut self, key: &str, value: String) {
        match key {
            "q" | "search" => self.search = value,
            "category" => self.category = value,
            "type" | "polarity" => self.polarity = value,
            "rewritten" => self.rewritten = value,
            "entity" => self.entity = value,
            "expanded" => {
                self.expanded = value
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(|k| RowKey::new(decode_component(k)))
                    .collect();
            }
            _ => {}
        }
    }

    pub fn feedback_filter(&self) -> FeedbackFilter {
        FeedbackFilter {
            search: SearchText::new(&self.search),
            category: Selection::parse(&self.category),
            polarity: PolarityFilter::parse(&self.polarity),
        }
    }

    pub fn zero_result_filter(&self) -> ZeroResultFilter {
        ZeroResultFilter {
            search: SearchText::new(&self.search),
            rewritten: RewrittenFilter::parse(&self.rewritten),
        }
    }

    pub fn rewritten_query_filter(&self) -> RewrittenQueryFilter {
        RewrittenQueryFilter {
            search: SearchText::new(&self.search),
            entity: Selection::parse(&self.entity),
        }
    }
}

/// Decode a `application/x-www-form-urlencoded` component. Malformed escapes
/// are kept literally.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feedback::Polarity;

    #[test]
    fn pairs_skip_missing_values() {
        let state = ViewState::from_pairs([
            ("q", Some("Battery".to_string())),
            ("type", None),
            ("rewritten", Some("no".to_string())),
        ]);
        assert_eq!(state.search, "Battery");
        assert!(state.polarity.is_empty());
        assert_eq!(state.zero_result_filter().rewritten, RewrittenFilter::No);
    }

    #[test]
    fn parses_filters_and_expanded_rows() {
        let state = ViewState::from_query(
            "?q=ups%20battery&category=Capacity&type=thumbsDown&expanded=fb-1,,fb-7",
        );
        assert_eq!(state.search, "ups battery");
        assert_eq!(state.category, "Capacity");
        assert_eq!(state.expanded.len(), 2);
        assert!(state.expanded.contains(&RowKey::new("fb-7")));

        let filter = state.feedback_filter();
        assert_eq!(filter.polarity, PolarityFilter::Only(Polarity::ThumbsDown));
    }

    #[test]
    fn expanded_keys_may_contain_commas() {
        // The browser encodes each key, then the whole value again.
        let state = ViewState::from_query("expanded=a%252Cb%2Cc");
        assert!(state.expanded.contains(&RowKey::new("a,b")));
        assert!(state.expanded.contains(&RowKey::new("c")));
        assert!(!state.expanded.contains(&RowKey::new("a")));
    }

    #[test]
    fn empty_query_is_default_state() {
        assert_eq!(ViewState::from_query(""), ViewState::default());
        assert!(ViewState::default().feedback_filter().search.as_str().is_empty());
    }

    #[test]
    fn decodes_plus_and_bad_escapes() {
        assert_eq!(decode_component("a+b"), "a b");
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
        assert_eq!(decode_component("caf%C3%A9"), "café");
    }
}
