//! Navigation: the five dashboard routes and their labels.

use std::fmt;

use serde::Serialize;

/// A dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Overview,
    QueryRewriter,
    Adoption,
    Feedback,
    ContentHealth,
}

impl Route {
    /// Navigation order.
    pub const ALL: [Route; 5] = [
        Route::Overview,
        Route::Adoption,
        Route::Feedback,
        Route::QueryRewriter,
        Route::ContentHealth,
    ];

    /// Resolve a location path. Trailing slashes and a query string are
    /// ignored; `/rewriter` is accepted for old links.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/index.html" => Some(Self::Overview),
            "/query-rewriter" | "/rewriter" => Some(Self::QueryRewriter),
            "/adoption" => Some(Self::Adoption),
            "/feedback" => Some(Self::Feedback),
            "/content-health" => Some(Self::ContentHealth),
            _ => None,
        }
    }

    /// Resolve the slug used in `/api/pages/<slug>` and on the command line.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim_matches('/') {
            "" | "overview" => Some(Self::Overview),
            other => Self::from_path(&format!("/{other}")),
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Overview => "/",
            Self::QueryRewriter => "/query-rewriter",
            Self::Adoption => "/adoption",
            Self::Feedback => "/feedback",
            Self::ContentHealth => "/content-health",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::QueryRewriter => "query-rewriter",
            Self::Adoption => "adoption",
            Self::Feedback => "feedback",
            Self::ContentHealth => "content-health",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::QueryRewriter => "Query Rewriter",
            Self::Adoption => "Adoption",
            Self::Feedback => "Feedback",
            Self::ContentHealth => "Content Health",
        }
    }

    /// One-line description used for quick links.
    pub fn description(self) -> &'static str {
        match self {
            Self::Overview => "Key metrics across all Nexus analytics",
            Self::QueryRewriter => "Entity expansion, latency, and answer quality",
            Self::Adoption => "Active users, engagement, and usage patterns",
            Self::Feedback => "User feedback and satisfaction",
            Self::ContentHealth => "Zero-result queries and content gaps",
        }
    }

    /// Breadcrumb trail from the root to this page.
    pub fn breadcrumb(self) -> Vec<Route> {
        match self {
            Self::Overview => vec![Self::Overview],
            other => vec![Self::Overview, other],
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the navigation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub route: Route,
    pub path: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub active: bool,
}

/// The navigation table, marking `current` as active.
pub fn nav_items(current: Option<Route>) -> Vec<NavItem> {
    Route::ALL
        .iter()
        .map(|&route| NavItem {
            route,
            path: route.path(),
            label: route.label(),
            description: route.description(),
            active: current == Some(route),
        })
        .collect()
}
