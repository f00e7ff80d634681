//! Lazily loaded data for the navbar "years" menu.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Notify, OnceCell};
use tracing::{info, warn};

use crate::clients::{YearsError, YearsSource};
use crate::models::{DecadeGroup, MenuProgress, MenuSource, YearMenu, YearsPayload};

const SPLIT_DECADE: &str = "2020s";
const MERGE_DECADE: &str = "2025s";
const SPLIT_CUTOFF: i32 = 2025;
const RELOCATED_YEARS: [i32; 2] = [2026, 2027];

/// Static menu used when the aggregation endpoint cannot be reached.
#[must_use]
pub fn fallback_years() -> Vec<i32> {
    (2000..=2024).rev().collect()
}

/// Moves 2026 and 2027 from the "2020s" grouping into "2025s".
///
/// "2020s" keeps only years up to 2025. "2025s" gains the relocated years and
/// is sorted newest first. Every other grouping is returned unchanged. When
/// there is no "2025s" grouping the relocated years are dropped.
#[must_use]
pub fn correct_decades(decades: &[DecadeGroup]) -> Vec<DecadeGroup> {
    let relocated: Vec<i32> = decades
        .iter()
        .find(|group| group.decade == SPLIT_DECADE)
        .map(|group| {
            group
                .years
                .iter()
                .copied()
                .filter(|year| RELOCATED_YEARS.contains(year))
                .collect()
        })
        .unwrap_or_default();

    decades
        .iter()
        .map(|group| match group.decade.as_str() {
            SPLIT_DECADE => DecadeGroup::new(
                group.decade.clone(),
                group
                    .years
                    .iter()
                    .copied()
                    .filter(|year| *year <= SPLIT_CUTOFF)
                    .collect(),
            ),
            MERGE_DECADE => {
                let mut years = group.years.clone();
                years.extend_from_slice(&relocated);
                years.sort_unstable_by(|a, b| b.cmp(a));
                DecadeGroup::new(group.decade.clone(), years)
            }
            _ => group.clone(),
        })
        .collect()
}

/// Builds the menu from a live response. A response without `years` is an error.
pub fn menu_from_payload(payload: YearsPayload) -> Result<YearMenu, YearsError> {
    let progress = MenuProgress::from_payload(&payload);
    let years = payload.years.ok_or(YearsError::MissingYears)?;
    let decades = correct_decades(&payload.decades.unwrap_or_default());

    Ok(YearMenu {
        years,
        decades,
        progress,
        source: MenuSource::Live,
    })
}

#[must_use]
pub fn fallback_menu() -> YearMenu {
    YearMenu {
        years: fallback_years(),
        decades: Vec::new(),
        progress: MenuProgress::default(),
        source: MenuSource::Fallback,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    Unloaded,
    Loading,
    Loaded,
}

/// Fetches the years menu at most once for its whole lifetime.
///
/// One instance lives in the application state and is handed to every caller.
/// The fetch runs on its own task, so a trigger that is dropped mid-flight
/// (client disconnect, timeout) neither aborts it nor causes a second request.
/// A failed fetch is still "loaded" (with fallback data) and is never retried.
pub struct MenuDataCache {
    source: Arc<dyn YearsSource>,
    menu: Arc<OnceCell<YearMenu>>,
    started: AtomicBool,
    loaded: Arc<Notify>,
}

impl MenuDataCache {
    pub fn new(source: Arc<dyn YearsSource>) -> Self {
        Self {
            source,
            menu: Arc::new(OnceCell::new()),
            started: AtomicBool::new(false),
            loaded: Arc::new(Notify::new()),
        }
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        if self.menu.initialized() {
            MenuState::Loaded
        } else if self.started.load(Ordering::SeqCst) {
            MenuState::Loading
        } else {
            MenuState::Unloaded
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state() == MenuState::Loading
    }

    #[must_use]
    pub fn menu(&self) -> Option<&YearMenu> {
        self.menu.get()
    }

    /// Hover/focus trigger. Returns immediately once loaded.
    pub async fn ensure_loaded(&self) -> &YearMenu {
        if let Some(menu) = self.menu.get() {
            return menu;
        }

        if !self.started.swap(true, Ordering::SeqCst) {
            let source = Arc::clone(&self.source);
            let menu = Arc::clone(&self.menu);
            let loaded = Arc::clone(&self.loaded);
            tokio::spawn(async move {
                let _ = menu.set(Self::fetch(source.as_ref()).await);
                loaded.notify_waiters();
            });
        }

        loop {
            let notified = self.loaded.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(menu) = self.menu.get() {
                return menu;
            }
            notified.await;
        }
    }

    async fn fetch(source: &dyn YearsSource) -> YearMenu {
        match source.fetch_years().await.and_then(menu_from_payload) {
            Ok(menu) => {
                info!(
                    years = menu.years.len(),
                    decades = menu.decades.len(),
                    found = menu.progress.found_movies,
                    "Loaded years menu"
                );
                metrics::counter!("menu_fetch_total", "outcome" => "live").increment(1);
                menu
            }
            Err(e) => {
                warn!(error = %e, "Failed to load years menu, using static fallback");
                metrics::counter!("menu_fetch_total", "outcome" => "fallback").increment(1);
                fallback_menu()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct StubYears {
        payload: Option<YearsPayload>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl StubYears {
        fn new(payload: Option<YearsPayload>) -> Arc<Self> {
            Arc::new(Self {
                payload,
                delay: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn slow(payload: Option<YearsPayload>, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                payload,
                delay: Some(delay),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl YearsSource for StubYears {
        async fn fetch_years(&self) -> Result<YearsPayload, YearsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.delay {
                Some(delay) => tokio::time::sleep(delay).await,
                None => tokio::task::yield_now().await,
            }
            self.payload.clone().ok_or(YearsError::Status(503))
        }
    }

    fn live_payload() -> YearsPayload {
        YearsPayload {
            years: Some(vec![2027, 2026, 2025, 2024, 1999]),
            decades: Some(vec![
                DecadeGroup::new("2020s", (2020..=2027).collect()),
                DecadeGroup::new("2025s", vec![2025]),
                DecadeGroup::new("1990s", vec![1999]),
            ]),
            processed_movies: Some(1200),
            total_movies: Some(5000),
            found_movies: Some(900),
        }
    }

    #[test]
    fn correct_decades_moves_future_years() {
        let raw = vec![
            DecadeGroup::new("2020s", (2020..=2027).collect()),
            DecadeGroup::new("2025s", vec![2025]),
        ];

        let corrected = correct_decades(&raw);

        assert_eq!(
            corrected,
            vec![
                DecadeGroup::new("2020s", (2020..=2025).collect()),
                DecadeGroup::new("2025s", vec![2027, 2026, 2025]),
            ]
        );
    }

    #[test]
    fn correct_decades_without_merge_target_drops_years() {
        let raw = vec![DecadeGroup::new("2020s", vec![2026, 2027])];

        let corrected = correct_decades(&raw);

        assert_eq!(corrected, vec![DecadeGroup::new("2020s", vec![])]);
    }

    #[test]
    fn correct_decades_leaves_other_groups_alone() {
        let raw = vec![
            DecadeGroup::new("1990s", vec![1999, 1990, 1995]),
            DecadeGroup::new("2010s", vec![2011]),
        ];

        assert_eq!(correct_decades(&raw), raw);
        assert!(correct_decades(&[]).is_empty());
    }

    #[test]
    fn fallback_years_descend_from_2024() {
        let years = fallback_years();
        assert_eq!(years.len(), 25);
        assert_eq!(years.first(), Some(&2024));
        assert_eq!(years.last(), Some(&2000));
    }

    #[tokio::test]
    async fn ensure_loaded_fetches_once() {
        let source = StubYears::new(Some(live_payload()));
        let cache = MenuDataCache::new(source.clone());
        assert_eq!(cache.state(), MenuState::Unloaded);

        let first = cache.ensure_loaded().await.clone();
        let second = cache.ensure_loaded().await.clone();

        assert_eq!(source.calls(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.state(), MenuState::Loaded);
        assert_eq!(first.source, MenuSource::Live);
        assert_eq!(first.years, vec![2027, 2026, 2025, 2024, 1999]);
        assert_eq!(first.progress.processed_movies, 1200);
        assert_eq!(first.decades[1].years, vec![2027, 2026, 2025]);
    }

    #[tokio::test]
    async fn concurrent_triggers_share_one_fetch() {
        let source = StubYears::new(Some(live_payload()));
        let cache = MenuDataCache::new(source.clone());

        let (a, b, c) = tokio::join!(
            cache.ensure_loaded(),
            cache.ensure_loaded(),
            cache.ensure_loaded()
        );

        assert_eq!(source.calls(), 1);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[tokio::test]
    async fn failure_loads_fallback_without_retry() {
        let source = StubYears::new(None);
        let cache = MenuDataCache::new(source.clone());

        let menu = cache.ensure_loaded().await.clone();
        cache.ensure_loaded().await;

        assert_eq!(source.calls(), 1);
        assert_eq!(menu.source, MenuSource::Fallback);
        assert_eq!(menu.years, fallback_years());
        assert!(menu.decades.is_empty());
        assert_eq!(cache.state(), MenuState::Loaded);
        assert!(!cache.is_loading());
    }

    #[tokio::test]
    async fn missing_years_counts_as_failure() {
        let payload = YearsPayload {
            decades: Some(vec![DecadeGroup::new("2020s", vec![2024])]),
            ..YearsPayload::default()
        };
        let cache = MenuDataCache::new(StubYears::new(Some(payload)));

        let menu = cache.ensure_loaded().await;

        assert_eq!(menu.source, MenuSource::Fallback);
        assert_eq!(menu.years, fallback_years());
    }

    #[tokio::test]
    async fn dropped_trigger_does_not_abort_the_fetch() {
        let source = StubYears::slow(Some(live_payload()), Duration::from_millis(200));
        let cache = MenuDataCache::new(source.clone());

        let timed_out = tokio::time::timeout(Duration::from_millis(20), cache.ensure_loaded()).await;
        assert!(timed_out.is_err());
        assert_eq!(cache.state(), MenuState::Loading);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(cache.state(), MenuState::Loaded);

        let menu = cache.ensure_loaded().await;
        assert_eq!(menu.source, MenuSource::Live);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn trigger_after_dropped_one_joins_the_same_fetch() {
        let source = StubYears::slow(Some(live_payload()), Duration::from_millis(100));
        let cache = MenuDataCache::new(source.clone());

        let _ = tokio::time::timeout(Duration::from_millis(10), cache.ensure_loaded()).await;
        let menu = cache.ensure_loaded().await;

        assert_eq!(menu.years, vec![2027, 2026, 2025, 2024, 1999]);
        assert_eq!(source.calls(), 1);
        assert!(!cache.is_loading());
    }
}
