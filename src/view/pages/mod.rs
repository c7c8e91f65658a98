//! Page builders, one per route.
//!
//! Each builder is a pure function of the datasets, the configuration, and
//! the request's [`ViewState`]. [`build`] wraps the page body with the
//! navigation table and breadcrumb shared by every page.

pub mod adoption;
pub mod content_health;
pub mod feedback;
pub mod overview;
pub mod rewriter;

use serde::Serialize;

use crate::config::schema::NexusConfig;
use crate::data::Datasets;

use super::ViewState;
use super::components::Badge;
use super::route::{NavItem, Route, nav_items};

/// Title block at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageHeader {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl PageHeader {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            badge: None,
        }
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: &'static str,
    pub path: &'static str,
}

/// Page-specific content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PageBody {
    Overview(overview::OverviewPage),
    QueryRewriter(rewriter::RewriterPage),
    Adoption(adoption::AdoptionPage),
    Feedback(feedback::FeedbackPage),
    ContentHealth(content_health::ContentHealthPage),
}

impl PageBody {
    pub fn header(&self) -> &PageHeader {
        match self {
            Self::Overview(p) => &p.header,
            Self::QueryRewriter(p) => &p.header,
            Self::Adoption(p) => &p.header,
            Self::Feedback(p) => &p.header,
            Self::ContentHealth(p) => &p.header,
        }
    }
}

/// A complete page view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub route: Route,
    pub path: &'static str,
    pub breadcrumb: Vec<Crumb>,
    pub nav: Vec<NavItem>,
    pub body: PageBody,
}

/// Build the page for `route`.
pub fn build(route: Route, datasets: &Datasets, config: &NexusConfig, state: &ViewState) -> Page {
    let body = match route {
        Route::Overview => PageBody::Overview(overview::build(datasets, config)),
        Route::QueryRewriter => PageBody::QueryRewriter(rewriter::build(datasets, config, state)),
        Route::Adoption => PageBody::Adoption(adoption::build(datasets, config)),
        Route::Feedback => PageBody::Feedback(feedback::build(datasets, config, state)),
        Route::ContentHealth => {
            PageBody::ContentHealth(content_health::build(datasets, config, state))
        }
    };

    Page {
        route,
        path: route.path(),
        breadcrumb: route
            .breadcrumb()
            .into_iter()
            .map(|r| Crumb {
                label: r.label(),
                path: r.path(),
            })
            .collect(),
        nav: nav_items(Some(route)),
        body,
    }
}
