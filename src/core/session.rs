//! Startup mode selection and the grid's filter/sort state
//!
//! A session is created once per location, after the catalog load has
//! finished. Its route never changes; navigating elsewhere starts a new
//! session.

use super::catalog::{LoadOutcome, SortKey};
use super::route::Route;
use super::view::{Page, ViewBuilder};

/// Search box and sort selector contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    pub query: String,
    pub sort: SortKey,
}

pub struct Session {
    outcome: LoadOutcome,
    route: Route,
    controls: Controls,
    views: ViewBuilder,
}

impl Session {
    /// Enter grid or detail mode for `route` over a finished load
    pub fn start(outcome: LoadOutcome, route: Route, controls: Controls, views: ViewBuilder) -> Self {
        match &route {
            Route::Grid => tracing::debug!("Entering grid mode"),
            Route::Detail(id) => tracing::debug!("Entering detail mode for id {:?}", id),
        }

        Self {
            outcome,
            route,
            controls,
            views,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn controls_visible(&self) -> bool {
        !self.route.is_detail()
    }

    /// Update the search text. Ignored in detail mode.
    pub fn set_query(&mut self, query: impl Into<String>) {
        if self.controls_visible() {
            self.controls.query = query.into();
        }
    }

    /// Update the sort order. Ignored in detail mode.
    pub fn set_sort(&mut self, sort: SortKey) {
        if self.controls_visible() {
            tracing::debug!("Sorting by {}", sort.as_str());
            self.controls.sort = sort;
        }
    }

    /// Compute what to display now
    pub fn page(&self) -> Page {
        let view = if self.outcome.is_failure() {
            self.views.load_failed()
        } else {
            let catalog = &self.outcome.catalog;
            match &self.route {
                Route::Grid => {
                    let selected = catalog.filter_and_sort(&self.controls.query, self.controls.sort);
                    self.views.grid(selected)
                }
                Route::Detail(id) => {
                    let article = catalog.resolve_by_id(id);
                    if article.is_none() {
                        tracing::warn!("No article with id {:?}", id);
                    }
                    self.views.detail(article)
                }
            }
        };

        Page {
            controls_visible: self.controls_visible(),
            view,
        }
    }
}
