//! Search-and-navigate flow shared by the navbar and the landing pages.
//!
//! Every search box owns its own [`SearchController`]; controllers never share
//! sessions. A submit issues exactly one lookup, and only the response to the
//! most recent submit is allowed to touch the session.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::clients::MovieLookup;
use crate::models::{MovieListItem, SearchResult};
use crate::slug;

/// Candidates requested per lookup.
pub const SEARCH_LIMIT: usize = 20;

/// Performs the actual route change once a destination is known.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that only remembers where it was sent.
///
/// The HTTP layer turns the recorded destination into a redirect.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    destinations: std::sync::Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.destinations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    #[must_use]
    pub fn destinations(&self) -> Vec<String> {
        self.destinations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.destinations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}

/// Which search box a controller drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchVariant {
    /// The navbar box resets itself before navigating away.
    Navbar,
    /// Boxes embedded in a landing page keep their results for back-navigation.
    #[default]
    Page,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchSession {
    pub query: String,
    pub loading: bool,
    pub visible: bool,
    pub results: Vec<SearchResult>,
    pub status: SearchStatus,
}

impl SearchSession {
    /// A finished lookup that matched nothing, as opposed to one that failed.
    #[must_use]
    pub fn is_no_results(&self) -> bool {
        self.visible && !self.loading && self.results.is_empty() && self.status == SearchStatus::Ready
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.status, SearchStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank query; nothing happened.
    Ignored,
    /// The response (or failure) replaced the session's results.
    Applied,
    /// A newer submit was issued while this lookup was in flight; its response was dropped.
    Superseded,
}

/// Turns a raw metadata payload into navigable results.
///
/// Anything that is not a JSON array counts as zero results. Entries that do
/// not decode, or that lack a non-blank identifier, are dropped. Survivors keep
/// the service's order.
#[must_use]
pub fn normalize_results(payload: Value) -> Vec<SearchResult> {
    let Value::Array(entries) = payload else {
        debug!("Metadata response was not an array, treating as empty");
        return Vec::new();
    };

    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<MovieListItem>(entry).ok())
        .filter_map(SearchResult::from_item)
        .collect()
}

pub struct SearchController {
    variant: SearchVariant,
    lookup: Arc<dyn MovieLookup>,
    navigator: Arc<dyn Navigator>,
    session: Mutex<SearchSession>,
    sequence: AtomicU64,
}

impl SearchController {
    pub fn new(
        variant: SearchVariant,
        lookup: Arc<dyn MovieLookup>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            variant,
            lookup,
            navigator,
            session: Mutex::new(SearchSession::default()),
            sequence: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn variant(&self) -> SearchVariant {
        self.variant
    }

    pub async fn snapshot(&self) -> SearchSession {
        self.session.lock().await.clone()
    }

    /// Records typed text without searching.
    pub async fn set_query(&self, text: &str) {
        self.session.lock().await.query = text.to_string();
    }

    /// Shows the (possibly stale) result list again.
    pub async fn focus(&self) {
        self.session.lock().await.visible = true;
    }

    /// Never returns an error: failures end up as an empty result list with
    /// [`SearchStatus::Failed`].
    pub async fn submit(&self, query_text: &str) -> SubmitOutcome {
        let trimmed = query_text.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut session = self.session.lock().await;
            session.query = query_text.to_string();
            session.loading = true;
            session.visible = true;
            session.status = SearchStatus::Loading;
        }

        let response = self.lookup.search_movies(trimmed, SEARCH_LIMIT).await;

        let mut session = self.session.lock().await;
        if self.sequence.load(Ordering::SeqCst) != ticket {
            debug!(query = trimmed, ticket, "Dropping superseded search response");
            metrics::counter!("search_lookups_total", "outcome" => "superseded").increment(1);
            return SubmitOutcome::Superseded;
        }

        match response {
            Ok(payload) => {
                session.results = normalize_results(payload);
                session.status = SearchStatus::Ready;
                debug!(
                    query = trimmed,
                    results = session.results.len(),
                    "Search lookup finished"
                );
                metrics::counter!("search_lookups_total", "outcome" => "success").increment(1);
            }
            Err(e) => {
                warn!(query = trimmed, error = %e, "Search lookup failed");
                session.results = Vec::new();
                session.status = SearchStatus::Failed {
                    message: e.to_string(),
                };
                metrics::counter!("search_lookups_total", "outcome" => "error").increment(1);
            }
        }
        session.loading = false;

        SubmitOutcome::Applied
    }

    /// Navigates to the canonical page of `result` and returns the destination.
    pub async fn select_result(&self, result: &SearchResult) -> String {
        let destination = slug::movie_url(&result.title, &result.imdb_id);

        if self.variant == SearchVariant::Navbar {
            let mut session = self.session.lock().await;
            session.query.clear();
            session.visible = false;
        }

        self.navigator.navigate(&destination);
        destination
    }

    /// Hides the results and empties the query. The result list itself is kept.
    pub async fn clear(&self) {
        let mut session = self.session.lock().await;
        session.query.clear();
        session.visible = false;
    }
}
